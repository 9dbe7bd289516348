//! UserRepository - Domain abstraction for user persistence

use crate::errors::DomainResult;
use std::sync::Arc;

/// Repository abstraction consumed by [`crate::UserService`]
///
/// Follows Repository Pattern - domain defines the interface,
/// infrastructure provides the implementation
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Persist a value.
    ///
    /// `Ok(true)` if persisted, `Ok(false)` if the implementation's policy
    /// declined it. Empty strings are valid input.
    fn save(&self, value: &str) -> DomainResult<bool>;
}


/// Shared repositories, e.g. a real store that a spy wraps while the test
/// keeps its own handle to observe it
impl<R: UserRepository + ?Sized> UserRepository for Arc<R> {
    fn save(&self, value: &str) -> DomainResult<bool> {
        (**self).save(value)
    }
}
