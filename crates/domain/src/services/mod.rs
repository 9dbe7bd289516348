//! Domain Services - Pure business logic services
//!
//! Operate on repository abstractions only

pub mod user_service;

pub use user_service::{UserService, UserServiceTrait};
