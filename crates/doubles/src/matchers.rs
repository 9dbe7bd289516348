//! Argument matchers used by stubs and verifications
//!
//! Arguments are captured as `serde_json::Value`, so a matcher compares
//! against the serialized form of what the caller passed.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matches a single captured argument
#[derive(Clone)]
pub enum ArgMatcher {
    /// Accepts any value
    Any,
    /// Accepts a value equal to the captured one
    Eq(Value),
    /// Accepts values for which the predicate holds
    Predicate(PredicateFn),
}

impl ArgMatcher {
    pub fn matches(&self, arg: &Value) -> bool {
        match self {
            ArgMatcher::Any => true,
            ArgMatcher::Eq(expected) => expected == arg,
            ArgMatcher::Predicate(predicate) => predicate(arg),
        }
    }
}

impl fmt::Debug for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgMatcher::Any => write!(f, "any()"),
            ArgMatcher::Eq(value) => write!(f, "eq({value})"),
            ArgMatcher::Predicate(_) => write!(f, "function(..)"),
        }
    }
}

/// Match-all matcher
pub fn any() -> ArgMatcher {
    ArgMatcher::Any
}

/// Equality matcher.
///
/// A value that cannot be serialized produces a matcher that never matches.
pub fn eq<T: Serialize>(value: T) -> ArgMatcher {
    match serde_json::to_value(value) {
        Ok(value) => ArgMatcher::Eq(value),
        Err(e) => {
            tracing::warn!(error = %e, "eq() matcher value is not serializable, it will never match");
            ArgMatcher::Predicate(Arc::new(|_| false))
        }
    }
}

/// Predicate matcher over the captured argument
pub fn function<F>(predicate: F) -> ArgMatcher
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    ArgMatcher::Predicate(Arc::new(predicate))
}

/// A matcher list accepts a call iff arities agree and every position matches
pub fn matches_all(matchers: &[ArgMatcher], args: &[Value]) -> bool {
    matchers.len() == args.len()
        && matchers
            .iter()
            .zip(args)
            .all(|(matcher, arg)| matcher.matches(arg))
}
