//! Test Doubles - mocks and spies with call verification
//!
//! - Mock: no real implementation behind it; answers with stubs or zero values
//! - Spy: wraps a real instance; runs the real logic and its side effects
//!
//! Both record every invocation in order, and verification inspects that
//! record without changing it.

pub mod call_log;
pub mod capabilities;
pub mod double;
pub mod errors;
pub mod lifecycle;
pub mod matchers;
pub mod stubs;
pub mod times;

pub use call_log::{CallLog, CallRecord};
pub use capabilities::ListCapability;
pub use double::{capture, Double, DoubleKind, StubBuilder};
pub use errors::{DoubleError, DoubleResult};
pub use lifecycle::{CaseFailure, Fixture, FixtureGuard, Suite, SuiteReport};
pub use matchers::{any, eq, function, ArgMatcher};
pub use times::{at_least, at_least_once, at_most, never, times, Times};
