//! UserService - user business logic
//!
//! Stateless apart from the injected repository

use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use std::sync::Arc;
use tracing::debug;

/// Domain service for user operations
///
/// Owns a reference to exactly one repository, supplied by the caller.
/// The service never builds or looks up a repository on its own.
pub struct UserService<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    /// Create new service around an injected repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Join first and last name verbatim: no trimming, no separator.
    ///
    /// An absent argument fails with [`DomainError::NullArgument`]; empty
    /// strings are valid.
    pub fn concatenate(&self, first: Option<&str>, second: Option<&str>) -> DomainResult<String> {
        let first = first.ok_or(DomainError::NullArgument { argument: "first" })?;
        let second = second.ok_or(DomainError::NullArgument { argument: "second" })?;

        let mut full_name = String::with_capacity(first.len() + second.len());
        full_name.push_str(first);
        full_name.push_str(second);
        Ok(full_name)
    }

    /// Delegate to the repository exactly once and hand back its answer,
    /// errors included
    pub fn save_on_database(&self, value: &str) -> DomainResult<bool> {
        let saved = self.repository.save(value);
        debug!(value, outcome = ?saved, "delegated save to repository");
        saved
    }
}

/// Trait for service operations, for layers that depend on the service abstractly
pub trait UserServiceTrait: Send + Sync {
    fn concatenate(&self, first: Option<&str>, second: Option<&str>) -> DomainResult<String>;

    fn save_on_database(&self, value: &str) -> DomainResult<bool>;
}

impl<R> UserServiceTrait for UserService<R>
where
    R: UserRepository + ?Sized,
{
    fn concatenate(&self, first: Option<&str>, second: Option<&str>) -> DomainResult<String> {
        self.concatenate(first, second)
    }

    fn save_on_database(&self, value: &str) -> DomainResult<bool> {
        self.save_on_database(value)
    }
}
