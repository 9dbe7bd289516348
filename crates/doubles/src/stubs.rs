//! Stub table for mocks

use crate::matchers::{matches_all, ArgMatcher};
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Debug, Clone)]
struct Stub {
    method: String,
    matchers: Vec<ArgMatcher>,
    value: Value,
}

/// Configured return values. The most recently added matching stub wins.
#[derive(Debug, Default)]
pub struct StubTable {
    stubs: Mutex<Vec<Stub>>,
}

impl StubTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, method: &str, matchers: Vec<ArgMatcher>, value: Value) {
        self.stubs.lock().push(Stub {
            method: method.to_string(),
            matchers,
            value,
        });
    }

    pub fn lookup(&self, method: &str, args: &[Value]) -> Option<Value> {
        self.stubs
            .lock()
            .iter()
            .rev()
            .find(|stub| stub.method == method && matches_all(&stub.matchers, args))
            .map(|stub| stub.value.clone())
    }

    pub fn len(&self) -> usize {
        self.stubs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.stubs.lock().clear();
    }
}
