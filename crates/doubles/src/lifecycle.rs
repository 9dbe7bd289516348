//! Test lifecycle hooks
//!
//! The standard test harness has no before/after callbacks, so setup and
//! teardown are explicit: a [`Fixture`] describes the four hooks, and the
//! calling test composes them either per test through [`FixtureGuard`] or
//! for a whole group of cases through [`Suite`].

use parking_lot::{const_mutex, Mutex};
use std::any::{Any, TypeId};
use std::ops::{Deref, DerefMut};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{info, warn};

/// Setup and teardown hooks for one kind of test state
pub trait Fixture: Sized + 'static {
    /// Once, before the first case
    fn before_all() {}

    /// Build fresh state for one case
    fn before_each() -> Self;

    /// Tear down one case's state, also after a failing case
    fn after_each(&mut self) {}

    /// Once, after the last case. Only [`Suite`] can run this hook.
    fn after_all() {}
}

/// Per fixture type: whether `before_all` has completed
static INITIALIZED: Mutex<Vec<(TypeId, Arc<Mutex<bool>>)>> = const_mutex(Vec::new());

/// Runs `F::before_all` the first time it is called for `F` in this process.
/// The registry lock is released before the hook runs, and a panicking hook
/// is retried by the next caller.
fn ensure_before_all<F: Fixture>() {
    let id = TypeId::of::<F>();
    let state = {
        let mut initialized = INITIALIZED.lock();
        let position = initialized.iter().position(|(known, _)| *known == id);
        match position {
            Some(index) => Arc::clone(&initialized[index].1),
            None => {
                let state = Arc::new(Mutex::new(false));
                initialized.push((id, Arc::clone(&state)));
                state
            }
        }
    };

    let mut done = state.lock();
    if !*done {
        F::before_all();
        *done = true;
    }
}

/// Per-test fixture: `before_all` (once per process), then `before_each`
/// on setup, `after_each` on drop.
pub struct FixtureGuard<F: Fixture> {
    fixture: F,
}

impl<F: Fixture> FixtureGuard<F> {
    pub fn setup() -> Self {
        ensure_before_all::<F>();
        Self {
            fixture: F::before_each(),
        }
    }
}

impl<F: Fixture> Deref for FixtureGuard<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.fixture
    }
}

impl<F: Fixture> DerefMut for FixtureGuard<F> {
    fn deref_mut(&mut self) -> &mut F {
        &mut self.fixture
    }
}

impl<F: Fixture> Drop for FixtureGuard<F> {
    fn drop(&mut self) {
        self.fixture.after_each();
    }
}

type CaseBody<F> = Box<dyn Fn(&mut F)>;

struct Case<F> {
    name: String,
    body: CaseBody<F>,
}

/// A failed case and its panic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of [`Suite::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    pub suite: String,
    pub passed: Vec<String>,
    pub failed: Vec<CaseFailure>,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Panic with every failure listed, for use at the end of a `#[test]`
    pub fn assert_all_passed(&self) {
        if !self.is_success() {
            let details: Vec<String> = self
                .failed
                .iter()
                .map(|failure| format!("  {}: {}", failure.name, failure.message))
                .collect();
            panic!(
                "suite `{}`: {} of {} case(s) failed\n{}",
                self.suite,
                self.failed.len(),
                self.total(),
                details.join("\n")
            );
        }
    }
}

/// Ordered group of cases sharing a fixture type.
///
/// `run` calls `before_all`, then per case `before_each`, the case body and
/// `after_each`, then `after_all`. A panic in a case body or in any hook
/// but `after_all` is reported as that case's failure and does not stop the
/// remaining cases; `after_all` always runs.
pub struct Suite<F: Fixture> {
    name: String,
    cases: Vec<Case<F>>,
}

impl<F: Fixture> Suite<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, name: impl Into<String>, body: impl Fn(&mut F) + 'static) -> Self {
        self.cases.push(Case {
            name: name.into(),
            body: Box::new(body),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn run(self) -> SuiteReport {
        let mut report = SuiteReport {
            suite: self.name.clone(),
            ..SuiteReport::default()
        };

        info!(suite = %self.name, cases = self.cases.len(), "before all");
        let setup = panic::catch_unwind(AssertUnwindSafe(F::before_all)).map_err(|payload| {
            format!("before_all panicked: {}", panic_message(payload.as_ref()))
        });

        for case in &self.cases {
            let outcome = match &setup {
                Ok(()) => self.run_case(case),
                Err(message) => Err(message.clone()),
            };

            match outcome {
                Ok(()) => report.passed.push(case.name.clone()),
                Err(message) => {
                    warn!(suite = %self.name, case = %case.name, %message, "case failed");
                    report.failed.push(CaseFailure {
                        name: case.name.clone(),
                        message,
                    });
                }
            }
        }

        F::after_all();
        info!(
            suite = %self.name,
            passed = report.passed.len(),
            failed = report.failed.len(),
            "after all"
        );
        report
    }

    /// One case between its own `before_each` and `after_each`. Panics in
    /// any of the three become the case's failure message; the body's panic
    /// takes precedence over a teardown panic.
    fn run_case(&self, case: &Case<F>) -> Result<(), String> {
        info!(suite = %self.name, case = %case.name, "before each");
        let mut fixture = panic::catch_unwind(AssertUnwindSafe(F::before_each)).map_err(|payload| {
            format!("before_each panicked: {}", panic_message(payload.as_ref()))
        })?;

        let body = panic::catch_unwind(AssertUnwindSafe(|| (case.body)(&mut fixture)));
        let teardown = panic::catch_unwind(AssertUnwindSafe(|| fixture.after_each()));
        info!(suite = %self.name, case = %case.name, "after each");

        match (body, teardown) {
            (Err(payload), _) => Err(panic_message(payload.as_ref())),
            (Ok(()), Err(payload)) => Err(format!(
                "after_each panicked: {}",
                panic_message(payload.as_ref())
            )),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
