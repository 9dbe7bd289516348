//! CallLog - append-only record of invocations on a double

use crate::matchers::{matches_all, ArgMatcher};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logged invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Position in the log, starting at 0
    pub sequence: u64,
    pub method: String,
    pub args: Vec<Value>,
}

impl CallRecord {
    pub fn matches(&self, method: &str, matchers: &[ArgMatcher]) -> bool {
        self.method == method && matches_all(matchers, &self.args)
    }
}

#[derive(Debug, Default)]
struct LogState {
    records: Vec<CallRecord>,
    next_sequence: u64,
}

/// Calls are kept in invocation order and never reordered or deduplicated.
#[derive(Debug, Default)]
pub struct CallLog {
    state: Mutex<LogState>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call and return its sequence number
    pub fn record(&self, method: &str, args: Vec<Value>) -> u64 {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.records.push(CallRecord {
            sequence,
            method: method.to_string(),
            args,
        });
        sequence
    }

    /// Number of recorded calls matching method and arguments
    pub fn count_matching(&self, method: &str, matchers: &[ArgMatcher]) -> usize {
        self.state
            .lock()
            .records
            .iter()
            .filter(|record| record.matches(method, matchers))
            .count()
    }

    /// Snapshot of every recorded call
    pub fn snapshot(&self) -> Vec<CallRecord> {
        self.state.lock().records.clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<CallRecord> {
        self.state
            .lock()
            .records
            .iter()
            .filter(|record| record.method == method)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all records. Sequence numbering restarts at 0.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.next_sequence = 0;
    }
}
