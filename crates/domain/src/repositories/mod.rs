//! Repository Abstractions - Ports for Infrastructure Layer
//!
//! Defines contracts between Domain and Infrastructure layers
//! Follows Dependency Inversion Principle

mod user_repository;

pub use user_repository::UserRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
