//! Double Errors - misuse of the test double API
//!
//! Every variant is a test-authoring mistake, never a collaborator failure

use crate::times::Times;
use thiserror::Error;

/// Errors raised while configuring, invoking or verifying a double
#[derive(Error, Debug)]
pub enum DoubleError {
    /// Stubs only apply to mocks; a spy always delegates to its real instance
    #[error("Cannot stub `{method}` on a spy: spies delegate to the real instance")]
    StubOnSpy { method: String },

    /// A configured stub value does not fit the invoked method's return type
    #[error("Stub for `{method}` cannot be read as the method's return type: {source}")]
    StubTypeMismatch {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// An argument or stub value could not be captured
    #[error("Failed to capture value for `{method}`: {source}")]
    Serialization {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// Recorded calls do not satisfy the expected cardinality
    #[error("Verification failed for `{method}`: expected {expected}, recorded {actual} matching call(s)")]
    VerificationFailed {
        method: String,
        expected: Times,
        actual: usize,
    },
}

/// Double result type
pub type DoubleResult<T> = Result<T, DoubleError>;

impl DoubleError {
    /// Method the error refers to
    pub fn method(&self) -> &str {
        match self {
            DoubleError::StubOnSpy { method }
            | DoubleError::StubTypeMismatch { method, .. }
            | DoubleError::Serialization { method, .. }
            | DoubleError::VerificationFailed { method, .. } => method,
        }
    }

    /// Check if error comes from a failed verification rather than misconfiguration
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, DoubleError::VerificationFailed { .. })
    }
}
