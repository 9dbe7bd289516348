//! Domain Layer - user business logic
//!
//! Contains ONLY business logic, without dependencies on:
//! - Infrastructure (databases, file systems, networks)
//! - Frameworks (CLI, test runners)
//!
//! Layers:
//! - Repository Abstractions: interfaces for persistence
//! - Services: business rules built on those interfaces
//! - Config: plain configuration types, loaded by infrastructure

pub mod config;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(feature = "test-doubles")]
pub mod testing;

// Re-export core domain types
pub use errors::{DomainError, DomainResult, ErrorCategory};
pub use repositories::UserRepository;
pub use services::{UserService, UserServiceTrait};
