//! Library half of the `user-app` binary: service wiring and command handlers

pub mod commands;
pub mod logging;

pub use commands::{SaveOutcome, UserApp, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME};
pub use logging::logging_config;
