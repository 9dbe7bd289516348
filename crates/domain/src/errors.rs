//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, no infrastructure errors

use thiserror::Error;

/// Domain-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required argument was absent
    #[error("Argument `{argument}` must not be null")]
    NullArgument { argument: &'static str },

    /// Business validation: value rejected by a repository policy
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The repository failed to persist a value
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is a caller input error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::NullArgument { .. } | DomainError::InvalidValue(_)
        )
    }

    /// Check if error originates in persistence
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, DomainError::PersistenceFailure(_))
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        if self.is_validation_error() {
            ErrorCategory::Validation
        } else {
            ErrorCategory::Persistence
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Storage failures
    Persistence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let null = DomainError::NullArgument { argument: "first" };
        assert!(null.is_validation_error());
        assert_eq!(null.category(), ErrorCategory::Validation);

        let invalid = DomainError::InvalidValue("too long".to_string());
        assert_eq!(invalid.category(), ErrorCategory::Validation);

        let failure = DomainError::PersistenceFailure("disk full".to_string());
        assert!(failure.is_persistence_error());
        assert_eq!(failure.category(), ErrorCategory::Persistence);
    }

    #[test]
    fn test_error_messages() {
        let error = DomainError::NullArgument { argument: "second" };
        assert_eq!(error.to_string(), "Argument `second` must not be null");
    }
}
