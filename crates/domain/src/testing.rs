//! Test doubles for the user repository
//!
//! A mock answers `save` with its stub (or `false`); a spy forwards to the
//! wrapped repository. Both record every call for verification.

use crate::errors::DomainResult;
use crate::repositories::UserRepository;
use doubles::{capture, Double};
use std::sync::Arc;

/// Double standing in for any [`UserRepository`]
pub type UserRepositoryDouble = Double<dyn UserRepository>;

impl UserRepository for Double<dyn UserRepository> {
    fn save(&self, value: &str) -> DomainResult<bool> {
        self.invoke_result("save", vec![capture(value)], |repository| {
            repository.save(value)
        })
    }
}

/// Mock repository, shared so the test keeps a handle for stubbing and verification
pub fn mock_repository() -> Arc<UserRepositoryDouble> {
    Arc::new(Double::<dyn UserRepository>::mock().named("UserRepository"))
}

/// Spy around a real repository
pub fn spy_repository<R: UserRepository + 'static>(repository: R) -> Arc<UserRepositoryDouble> {
    Arc::new(Double::<dyn UserRepository>::spy_boxed(Box::new(repository)).named("UserRepository"))
}
