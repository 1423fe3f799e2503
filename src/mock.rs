//! The mock callable: records invocations, routes them through registered
//! expectations (or a fallback action), and verifies consumption.
//!
//! The model is single-threaded and synchronous: invocation, expectation
//! testing, default-action dispatch, and log mutation all happen on the
//! calling thread with no suspension points. `call` takes `&self`, so a
//! mock can itself serve as another mock's default action, failure
//! reporter, or call observer. Re-entrant dispatch only appends further
//! records; no log borrow is held across the default-action call.

use serde_json::Value;
use std::cell::{Cell, RefCell};
use tracing::{debug, trace};

use crate::error::VerifyError;
use crate::log::{unconsumed_message, CallLog};
use crate::matchers::{no_call_message, tuple_matches, ArgMatcher};
use crate::reporter::{CallObserver, FailureReporter};

/// Result of evaluating a verification without side effects on failure.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Whether a pending call was found and consumed.
    pub passed: bool,
    /// Description of what was checked.
    pub description: String,
    /// Failure text if no pending call matched.
    pub reason: Option<String>,
}

impl CheckResult {
    fn pass(description: impl Into<String>) -> Self {
        Self {
            passed: true,
            description: description.into(),
            reason: None,
        }
    }

    fn fail(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            description: description.into(),
            reason: Some(reason.into()),
        }
    }
}

/// A callable test double with call recording and verification.
///
/// Every invocation is appended to an internal log as a pending record.
/// Verification operations consume pending records by matching their
/// arguments against positional matcher tuples. On drop, any record that
/// was never consumed is reported as a failure, so no expected
/// interaction is silently lost.
///
/// The failure reporter, call observer, and default action are borrowed
/// and must outlive the mock.
///
/// # Example
///
/// ```rust
/// use understudy::{args, matchers, less_than, BufferReporter, MockFn};
///
/// let reporter = BufferReporter::new();
/// let mock = MockFn::new(2).with_reporter(&reporter);
///
/// mock.call(args![7, 4.2]);
/// mock.call(args![-4, 1.1]);
///
/// mock.check_called(matchers![less_than(8), 4.2]);
/// mock.require_called(matchers![-4, less_than(2)]);
///
/// drop(mock);
/// assert!(reporter.is_empty());
/// ```
pub struct MockFn<'a> {
    arity: usize,
    log: RefCell<CallLog>,
    expectations: RefCell<Vec<Vec<ArgMatcher>>>,
    default_action: Cell<Option<&'a dyn Fn(&[Value])>>,
    reporter: Option<&'a dyn FailureReporter>,
    observer: Option<&'a dyn CallObserver>,
    verified: Cell<bool>,
}

impl<'a> MockFn<'a> {
    /// Create a mock callable taking `arity` arguments per invocation.
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            log: RefCell::new(CallLog::new()),
            expectations: RefCell::new(Vec::new()),
            default_action: Cell::new(None),
            reporter: None,
            observer: None,
            verified: Cell::new(false),
        }
    }

    /// Route failures to `reporter` instead of panicking.
    pub fn with_reporter(mut self, reporter: &'a dyn FailureReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Notify `observer` of every invocation as it happens.
    pub fn with_observer(mut self, observer: &'a dyn CallObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Number of arguments this mock takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Invoke the mock.
    ///
    /// Appends a pending record, notifies the observer, then tests the
    /// arguments against registered expectations in registration order.
    /// If none match, the default action (when bound) is dispatched
    /// synchronously with the same arguments. The record stays in the log
    /// either way, available for later verification.
    ///
    /// # Panics
    ///
    /// Panics if `args` does not match the mock's arity.
    pub fn call(&self, args: Vec<Value>) {
        assert_eq!(
            args.len(),
            self.arity,
            "mock takes {} arguments, got {}",
            self.arity,
            args.len()
        );
        trace!(?args, "mock invoked");

        self.log.borrow_mut().record(args.clone());

        if let Some(observer) = self.observer {
            observer.notify_call(&args);
        }

        let expected = self
            .expectations
            .borrow()
            .iter()
            .any(|expectation| tuple_matches(expectation, &args));

        if !expected {
            if let Some(action) = self.default_action.get() {
                debug!(?args, "dispatching default action");
                action(&args);
            }
        }
    }

    // =========================================================================
    // Expectation and default-action routing
    // =========================================================================

    /// Register an expectation: calls whose arguments satisfy `matchers`
    /// are treated as expected and are not routed to the default action.
    ///
    /// Duplicate and overlapping expectations are all retained.
    ///
    /// # Panics
    ///
    /// Panics if the matcher tuple does not match the mock's arity.
    pub fn on_call(&self, matchers: Vec<ArgMatcher>) {
        self.assert_matcher_arity(&matchers);
        self.expectations.borrow_mut().push(matchers);
    }

    /// Bind the fallback action invoked for every call not covered by a
    /// registered expectation. Rebinding replaces the previous action.
    pub fn default_action(&self, action: &'a dyn Fn(&[Value])) {
        self.default_action.set(Some(action));
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Consume the first pending call matching `matchers`, reporting a
    /// failure (and continuing) if none matched.
    ///
    /// With no bound reporter the failure is fatal instead.
    ///
    /// # Panics
    ///
    /// Panics on failure when no reporter is bound, or on arity mismatch.
    pub fn check_called(&self, matchers: Vec<ArgMatcher>) {
        let result = self.evaluate_called(matchers);
        if let Some(reason) = &result.reason {
            match self.reporter {
                Some(reporter) => reporter.report_failure(reason),
                None => panic!("assertion failed: {reason}"),
            }
        }
    }

    /// Consume the first pending call matching `matchers`, failing the
    /// test immediately if none matched.
    ///
    /// Unlike [`check_called`](Self::check_called), failure is always
    /// fatal and bypasses the reporter.
    ///
    /// # Panics
    ///
    /// Panics if no pending call matched, or on arity mismatch.
    pub fn require_called(&self, matchers: Vec<ArgMatcher>) {
        let result = self.evaluate_called(matchers);
        if let Some(reason) = &result.reason {
            panic!("assertion failed: {reason}");
        }
    }

    /// Like [`check_called`](Self::check_called), but routes the failure
    /// to a caller-supplied reporter instead of the mock's own.
    ///
    /// # Panics
    ///
    /// Panics on arity mismatch.
    pub fn validate_called(&self, reporter: &dyn FailureReporter, matchers: Vec<ArgMatcher>) {
        let result = self.evaluate_called(matchers);
        if let Some(reason) = &result.reason {
            reporter.report_failure(reason);
        }
    }

    /// Evaluate a verification without reporting or panicking on failure.
    ///
    /// Matching semantics are identical to
    /// [`check_called`](Self::check_called): on success the earliest
    /// matching pending call is consumed.
    ///
    /// # Panics
    ///
    /// Panics on arity mismatch.
    pub fn evaluate_called(&self, matchers: Vec<ArgMatcher>) -> CheckResult {
        self.assert_matcher_arity(&matchers);

        let description = format!(
            "call where arguments ({})",
            matchers
                .iter()
                .map(|m| m.describe())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if self.log.borrow_mut().find_and_consume(&matchers) {
            trace!(%description, "verification consumed a call");
            CheckResult::pass(description)
        } else {
            CheckResult::fail(description, no_call_message(&matchers))
        }
    }

    /// Explicit teardown: consume the mock and return an error listing
    /// every recorded call that was never consumed.
    ///
    /// Disarms the drop-time report, whether or not verification passed.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] if any recorded call is still pending.
    pub fn verify(self) -> Result<(), VerifyError> {
        self.verified.set(true);
        let unconsumed = self.log.borrow().drain_unconsumed();
        if unconsumed.is_empty() {
            Ok(())
        } else {
            Err(VerifyError { unconsumed })
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of calls recorded so far, consumed or not.
    pub fn call_count(&self) -> usize {
        self.log.borrow().len()
    }

    /// Argument tuples of every recorded call, in invocation order.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.log
            .borrow()
            .records()
            .iter()
            .map(|record| record.args().to_vec())
            .collect()
    }

    fn assert_matcher_arity(&self, matchers: &[ArgMatcher]) {
        assert_eq!(
            matchers.len(),
            self.arity,
            "mock takes {} arguments, matcher tuple has {}",
            self.arity,
            matchers.len()
        );
    }
}

impl Drop for MockFn<'_> {
    /// Final verification: every still-pending record is reported as a
    /// failure, one notification per record, in invocation order.
    ///
    /// With no bound reporter this panics, unless the thread is already
    /// panicking, in which case the report goes to stderr (a second panic
    /// would abort the process).
    fn drop(&mut self) {
        if self.verified.get() {
            return;
        }
        for args in self.log.get_mut().drain_unconsumed() {
            let message = unconsumed_message(&args);
            match self.reporter {
                Some(reporter) => reporter.report_failure(&message),
                None if !std::thread::panicking() => panic!("assertion failed: {message}"),
                None => eprintln!("understudy: {message}"),
            }
        }
    }
}

/// A mock can stand in as another mock's failure reporter: each reported
/// message is recorded as a one-argument call, so tests can verify
/// reported failures with the same matching operations.
impl FailureReporter for MockFn<'_> {
    fn report_failure(&self, message: &str) {
        self.call(vec![Value::from(message)]);
    }
}

/// A mock can stand in as another mock's call observer, recording every
/// notified invocation as a call of its own.
impl CallObserver for MockFn<'_> {
    fn notify_call(&self, args: &[Value]) {
        self.call(args.to_vec());
    }
}
