//! Infrastructure Layer - concrete adapters for the domain's ports
//!
//! - `repositories`: storage implementations of domain repository traits
//! - `config`: loading and validating `domain::config::AppConfig`

pub mod config;
pub mod repositories;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
pub use repositories::InMemoryUserRepository;
