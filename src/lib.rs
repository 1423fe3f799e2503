//! # understudy
//!
//! A call-expectation and verification engine for test doubles.
//!
//! A [`MockFn`] is a callable object that records every invocation it
//! receives. Test code consumes recorded invocations by matching their
//! arguments against composable matchers; unmatched invocations can be
//! forwarded to a fallback action; and on drop the mock fails loudly if
//! any recorded invocation was never consumed.
//!
//! ## Quick Start
//!
//! ```rust
//! use understudy::{args, matchers, less_than, BufferReporter, MockFn};
//!
//! let reporter = BufferReporter::new();
//! let mock = MockFn::new(2).with_reporter(&reporter);
//!
//! // Exercise the mock.
//! mock.call(args![7, 4.2]);
//! mock.call(args![-4, 1.1]);
//!
//! // Consume the recorded calls.
//! mock.check_called(matchers![less_than(8), 4.2]);
//! mock.require_called(matchers![-4, less_than(2)]);
//!
//! // Every call was consumed, so teardown reports nothing.
//! drop(mock);
//! assert!(reporter.is_empty());
//! ```
//!
//! ## Default Actions
//!
//! ```rust
//! use understudy::{args, matchers, any, BufferReporter, MockFn, Value};
//!
//! let reporter = BufferReporter::new();
//! let fallback = MockFn::new(1);
//! let forward = |call_args: &[Value]| fallback.call(call_args.to_vec());
//!
//! let mock = MockFn::new(1).with_reporter(&reporter);
//! mock.default_action(&forward);
//! mock.on_call(matchers![1]);
//!
//! mock.call(args![1]); // expected: not forwarded
//! mock.call(args![2]); // unmatched: forwarded to `fallback`
//!
//! mock.check_called(matchers![any()]);
//! mock.check_called(matchers![any()]);
//! drop(mock);
//!
//! fallback.require_called(matchers![2]);
//! assert!(fallback.verify().is_ok());
//! ```
//!
//! ## Explicit Verification
//!
//! ```rust
//! use understudy::{args, MockFn};
//!
//! let mock = MockFn::new(1);
//! mock.call(args![3]);
//!
//! let err = mock.verify().unwrap_err();
//! assert_eq!(err.count(), 1);
//! ```

pub mod error;
pub mod log;
pub mod matchers;
pub mod mock;
pub mod reporter;

// Core types
pub use error::VerifyError;
pub use log::{CallLog, CallRecord};
pub use mock::{CheckResult, MockFn};

// Matchers
pub use matchers::{
    any, eq, greater_than, less_than, matching, tuple_matches, ArgMatcher, IntoMatcher,
};

// Collaborators
pub use reporter::{BufferReporter, CallObserver, CallTrace, FailureReporter, PanicReporter};

// Argument values are plain JSON values.
pub use serde_json::Value;
