//! Double - mock and spy substitutes for a collaborator
//!
//! A `Double<T>` stands in for a `T`. Capability traits are implemented for
//! the double by routing every method through [`Double::invoke`] (or
//! [`Double::invoke_result`] for fallible methods), passing a closure that
//! performs the real call:
//!
//! - a **mock** has no backing instance. The closure is never run; the call
//!   returns the most recently configured matching stub, or the return
//!   type's `Default` value.
//! - a **spy** owns a real `T`. The closure runs against it, so real side
//!   effects happen and the real result is returned.
//!
//! Both kinds record every call before answering it, so verification works
//! identically for either.

use crate::call_log::{CallLog, CallRecord};
use crate::errors::{DoubleError, DoubleResult};
use crate::matchers::ArgMatcher;
use crate::stubs::StubTable;
use crate::times::Times;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace, warn};

/// Which kind of substitute a double is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleKind {
    Mock,
    Spy,
}

/// Capture an argument for the call log.
///
/// Values that cannot be serialized are recorded as `null`.
pub fn capture<S: Serialize + ?Sized>(value: &S) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "argument is not serializable, recording null");
        Value::Null
    })
}

/// Test double bound to the capability set of `T`
pub struct Double<T: ?Sized> {
    name: String,
    calls: CallLog,
    stubs: StubTable,
    backing: Option<Mutex<Box<T>>>,
}

impl<T: ?Sized> Double<T> {
    /// Create a mock: empty call log, no backing instance
    pub fn mock() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            calls: CallLog::new(),
            stubs: StubTable::new(),
            backing: None,
        }
    }

    /// Create a spy around an already boxed instance (needed for trait objects)
    pub fn spy_boxed(real: Box<T>) -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            calls: CallLog::new(),
            stubs: StubTable::new(),
            backing: Some(Mutex::new(real)),
        }
    }

    /// Name used in log output
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DoubleKind {
        if self.backing.is_some() {
            DoubleKind::Spy
        } else {
            DoubleKind::Mock
        }
    }

    pub fn is_mock(&self) -> bool {
        self.kind() == DoubleKind::Mock
    }

    pub fn is_spy(&self) -> bool {
        self.kind() == DoubleKind::Spy
    }

    /// Start configuring a stub for `method` called with matching arguments.
    ///
    /// Fails with [`DoubleError::StubOnSpy`] on a spy.
    pub fn when(&self, method: &str, matchers: Vec<ArgMatcher>) -> DoubleResult<StubBuilder<'_>> {
        if self.is_spy() {
            return Err(DoubleError::StubOnSpy {
                method: method.to_string(),
            });
        }

        Ok(StubBuilder {
            stubs: &self.stubs,
            double: &self.name,
            method: method.to_string(),
            matchers,
        })
    }

    /// Record a call and answer it.
    ///
    /// Spy: runs `real` on the wrapped instance. Mock: returns the matching
    /// stub decoded into `R`, or `R::default()`.
    pub fn try_invoke<R, F>(&self, method: &str, args: Vec<Value>, real: F) -> DoubleResult<R>
    where
        R: DeserializeOwned + Default,
        F: FnOnce(&mut T) -> R,
    {
        self.dispatch(method, args, |target| Ok(real(target)), |stub| {
            decode_stub(method, stub)
        })
    }

    /// Like [`Double::try_invoke`] but panics when a stub cannot be decoded,
    /// which is always a mistake in the test that configured it.
    pub fn invoke<R, F>(&self, method: &str, args: Vec<Value>, real: F) -> R
    where
        R: DeserializeOwned + Default,
        F: FnOnce(&mut T) -> R,
    {
        self.try_invoke(method, args, real)
            .unwrap_or_else(|e| panic!("{} double: {e}", self.name))
    }

    /// Record a call to a fallible method.
    ///
    /// Spy: the real `Result` is returned unchanged, errors included.
    /// Mock: `Ok` with the matching stub or `R::default()`.
    pub fn invoke_result<R, E, F>(&self, method: &str, args: Vec<Value>, real: F) -> Result<R, E>
    where
        R: DeserializeOwned + Default,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        self.dispatch(method, args, real, |stub| {
            decode_stub(method, stub)
                .map(Ok)
                .unwrap_or_else(|e| panic!("{} double: {e}", self.name))
        })
    }

    fn dispatch<O>(
        &self,
        method: &str,
        args: Vec<Value>,
        real: impl FnOnce(&mut T) -> O,
        stubbed: impl FnOnce(Option<Value>) -> O,
    ) -> O {
        let stub = match &self.backing {
            Some(_) => None,
            None => self.stubs.lookup(method, &args),
        };
        let sequence = self.calls.record(method, args);
        trace!(double = %self.name, method, sequence, kind = ?self.kind(), "call recorded");

        match &self.backing {
            Some(backing) => {
                let mut target = backing.lock();
                real(&mut **target)
            }
            None => stubbed(stub),
        }
    }

    /// Number of recorded calls to `method` whose arguments match
    pub fn call_count(&self, method: &str, matchers: &[ArgMatcher]) -> usize {
        self.calls.count_matching(method, matchers)
    }

    /// Check the call log against a cardinality. Never mutates the log.
    pub fn verify(&self, method: &str, matchers: &[ArgMatcher], times: Times) -> bool {
        let actual = self.call_count(method, matchers);
        let satisfied = times.is_satisfied_by(actual);
        if !satisfied {
            debug!(double = %self.name, method, expected = %times, actual, "verification not satisfied");
        }
        satisfied
    }

    /// Like [`Double::verify`] but describes the mismatch
    pub fn verify_that(&self, method: &str, matchers: &[ArgMatcher], times: Times) -> DoubleResult<()> {
        let actual = self.call_count(method, matchers);
        if times.is_satisfied_by(actual) {
            Ok(())
        } else {
            Err(DoubleError::VerificationFailed {
                method: method.to_string(),
                expected: times,
                actual,
            })
        }
    }

    /// Snapshot of every recorded call, in invocation order
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.snapshot()
    }

    pub fn calls_to(&self, method: &str) -> Vec<CallRecord> {
        self.calls.calls_to(method)
    }

    /// Forget all recorded calls. Stubs stay configured.
    pub fn reset_calls(&self) {
        self.calls.clear();
    }

    /// Read the spy's backing instance without recording a call.
    /// Returns `None` for a mock.
    pub fn inspect<O>(&self, f: impl FnOnce(&T) -> O) -> Option<O> {
        self.backing.as_ref().map(|backing| f(&**backing.lock()))
    }
}

impl<T> Double<T> {
    /// Create a spy wrapping `real`
    pub fn spy(real: T) -> Self {
        Self::spy_boxed(Box::new(real))
    }
}

impl<T: ?Sized> fmt::Debug for Double<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Double")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("calls", &self.calls.len())
            .field("stubs", &self.stubs.len())
            .finish()
    }
}

fn decode_stub<R: DeserializeOwned + Default>(method: &str, stub: Option<Value>) -> DoubleResult<R> {
    match stub {
        Some(value) => serde_json::from_value(value).map_err(|source| DoubleError::StubTypeMismatch {
            method: method.to_string(),
            source,
        }),
        None => Ok(R::default()),
    }
}

/// Pending stub returned by [`Double::when`]
pub struct StubBuilder<'a> {
    stubs: &'a StubTable,
    double: &'a str,
    method: String,
    matchers: Vec<ArgMatcher>,
}

impl StubBuilder<'_> {
    /// Answer matching calls with `value`
    pub fn then_return<V: Serialize>(self, value: V) -> DoubleResult<()> {
        let value = serde_json::to_value(value).map_err(|source| DoubleError::Serialization {
            method: self.method.clone(),
            source,
        })?;
        debug!(double = %self.double, method = %self.method, matchers = ?self.matchers, %value, "stub configured");
        self.stubs.insert(&self.method, self.matchers, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{any, eq};
    use crate::times::{at_least_once, never, times};

    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn hit(&mut self, by: u32) -> u32 {
            self.hits += by;
            self.hits
        }
    }

    fn hit(double: &Double<Counter>, by: u32) -> u32 {
        double.invoke("hit", vec![capture(&by)], |counter| counter.hit(by))
    }

    #[test]
    fn test_mock_returns_default_without_running_real_logic() {
        let mock: Double<Counter> = Double::mock();
        assert!(mock.is_mock());

        assert_eq!(hit(&mock, 5), 0);
        assert_eq!(mock.inspect(|c| c.hits), None);
        assert!(mock.verify("hit", &[eq(5)], times(1)));
    }

    #[test]
    fn test_mock_returns_configured_stub() -> DoubleResult<()> {
        let mock: Double<Counter> = Double::mock();
        mock.when("hit", vec![any()])?.then_return(10)?;
        mock.when("hit", vec![eq(2)])?.then_return(99)?;

        assert_eq!(hit(&mock, 1), 10);
        assert_eq!(hit(&mock, 2), 99);
        Ok(())
    }

    #[test]
    fn test_spy_runs_real_logic_and_records() {
        let spy = Double::spy(Counter { hits: 0 });
        assert!(spy.is_spy());

        assert_eq!(hit(&spy, 2), 2);
        assert_eq!(hit(&spy, 3), 5);
        assert_eq!(spy.inspect(|c| c.hits), Some(5));
        assert!(spy.verify("hit", &[any()], times(2)));
        assert!(spy.verify("hit", &[eq(3)], times(1)));
    }

    #[test]
    fn test_stubbing_a_spy_fails_fast() {
        let spy = Double::spy(Counter { hits: 0 });
        let err = spy.when("hit", vec![any()]).err();
        assert!(matches!(err, Some(DoubleError::StubOnSpy { ref method }) if method == "hit"));
    }

    #[test]
    fn test_stub_type_mismatch_is_reported() -> DoubleResult<()> {
        let mock: Double<Counter> = Double::mock();
        mock.when("hit", vec![any()])?.then_return("not a number")?;

        let result: DoubleResult<u32> = mock.try_invoke("hit", vec![capture(&1u32)], |c| c.hit(1));
        assert!(matches!(result, Err(DoubleError::StubTypeMismatch { .. })));
        // The call is still recorded
        assert!(mock.verify("hit", &[eq(1)], times(1)));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "cannot be read")]
    fn test_invoke_panics_on_stub_type_mismatch() {
        let mock: Double<Counter> = Double::mock().named("counter");
        mock.when("hit", vec![any()])
            .and_then(|stub| stub.then_return(vec!["x"]))
            .unwrap();
        hit(&mock, 1);
    }

    #[test]
    fn test_invoke_result_propagates_real_errors() {
        struct Flaky;
        impl Flaky {
            fn run(&mut self) -> Result<bool, String> {
                Err("boom".to_string())
            }
        }

        let spy = Double::spy(Flaky);
        let result: Result<bool, String> = spy.invoke_result("run", vec![], |f| f.run());
        assert_eq!(result, Err("boom".to_string()));

        let mock: Double<Flaky> = Double::mock();
        let result: Result<bool, String> = mock.invoke_result("run", vec![], |f| f.run());
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_verify_is_read_only_and_repeatable() {
        let mock: Double<Counter> = Double::mock();
        hit(&mock, 1);

        for _ in 0..3 {
            assert!(mock.verify("hit", &[eq(1)], times(1)));
            assert!(!mock.verify("hit", &[eq(1)], never()));
        }
        assert_eq!(mock.calls().len(), 1);
    }

    #[test]
    fn test_verify_that_describes_failure() {
        let mock: Double<Counter> = Double::mock();
        let err = mock.verify_that("hit", &[any()], at_least_once()).err();
        match err {
            Some(DoubleError::VerificationFailed { expected, actual, .. }) => {
                assert_eq!(expected, Times::AtLeastOnce);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_reset_calls_keeps_stubs() -> DoubleResult<()> {
        let mock: Double<Counter> = Double::mock();
        mock.when("hit", vec![any()])?.then_return(7)?;
        hit(&mock, 1);
        mock.reset_calls();

        assert!(mock.calls().is_empty());
        assert!(mock.verify("hit", &[any()], never()));
        assert_eq!(hit(&mock, 1), 7);
        Ok(())
    }

    #[test]
    fn test_debug_output() {
        let mock: Double<Counter> = Double::mock().named("counter");
        hit(&mock, 1);
        let debug = format!("{mock:?}");
        assert!(debug.contains("counter"));
        assert!(debug.contains("Mock"));
    }
}
