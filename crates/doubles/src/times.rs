//! Times - cardinality constraints for call verification

use std::fmt;

/// How many matching calls a verification expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    /// No matching call at all
    Never,
    /// One or more matching calls
    AtLeastOnce,
    /// Exactly `n` matching calls
    Exactly(usize),
    /// `n` or more matching calls
    AtLeast(usize),
    /// At most `n` matching calls
    AtMost(usize),
}

impl Times {
    /// Check whether an observed call count satisfies this constraint
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        match *self {
            Times::Never => count == 0,
            Times::AtLeastOnce => count >= 1,
            Times::Exactly(n) => count == n,
            Times::AtLeast(n) => count >= n,
            Times::AtMost(n) => count <= n,
        }
    }
}

impl Default for Times {
    /// Mockito-style default: a bare verification means exactly once
    fn default() -> Self {
        Times::Exactly(1)
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Times::Never => write!(f, "never"),
            Times::AtLeastOnce => write!(f, "at least once"),
            Times::Exactly(n) => write!(f, "exactly {n}"),
            Times::AtLeast(n) => write!(f, "at least {n}"),
            Times::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

pub fn never() -> Times {
    Times::Never
}

pub fn at_least_once() -> Times {
    Times::AtLeastOnce
}

/// Exactly `n` calls
pub fn times(n: usize) -> Times {
    Times::Exactly(n)
}

pub fn at_least(n: usize) -> Times {
    Times::AtLeast(n)
}

pub fn at_most(n: usize) -> Times {
    Times::AtMost(n)
}
