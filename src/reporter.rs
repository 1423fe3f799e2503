//! Collaborator interfaces for failure reporting and call observation.
//!
//! The engine notifies external collaborators on two distinct events, and
//! the two channels are deliberately separate traits:
//!
//! - [`FailureReporter`] receives a free-form diagnostic message per
//!   failure instance (verification misses, unconsumed calls at teardown).
//! - [`CallObserver`] receives a live notification of every invocation as
//!   it happens, independent of whether it matched an expectation.
//!
//! Both are optional collaborators, borrowed (not owned) by the mock, and
//! must outlive it.

use serde_json::Value;
use std::cell::RefCell;

/// Sink for failure diagnostics.
///
/// One `report_failure` call per failure instance: multiple unconsumed
/// records at teardown produce multiple separate notifications.
pub trait FailureReporter {
    fn report_failure(&self, message: &str);
}

/// Passive observer of invocations, fired synchronously for every call.
pub trait CallObserver {
    fn notify_call(&self, args: &[Value]);
}

/// Escalates every reported failure into a panic.
///
/// Useful when a test wants reporter-routed failures to be fatal anyway.
#[derive(Debug, Default)]
pub struct PanicReporter;

impl PanicReporter {
    pub fn new() -> Self {
        Self
    }
}

impl FailureReporter for PanicReporter {
    fn report_failure(&self, message: &str) {
        panic!("assertion failed: {message}");
    }
}

/// Collects failure messages for later inspection.
///
/// # Example
///
/// ```rust
/// use understudy::{BufferReporter, FailureReporter};
///
/// let reporter = BufferReporter::new();
/// reporter.report_failure("something went wrong");
///
/// assert_eq!(reporter.messages(), vec!["something went wrong"]);
/// ```
#[derive(Debug, Default)]
pub struct BufferReporter {
    messages: RefCell<Vec<String>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Remove and return all collected messages.
    pub fn take(&self) -> Vec<String> {
        self.messages.take()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }
}

impl FailureReporter for BufferReporter {
    fn report_failure(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Collects every observed invocation's arguments, in call order.
#[derive(Debug, Default)]
pub struct CallTrace {
    calls: RefCell<Vec<Vec<Value>>>,
}

impl CallTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all observed calls, in invocation order.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CallObserver for CallTrace {
    fn notify_call(&self, args: &[Value]) {
        self.calls.borrow_mut().push(args.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_buffer_reporter_collects_in_order() {
        let reporter = BufferReporter::new();
        reporter.report_failure("first");
        reporter.report_failure("second");

        assert_eq!(reporter.len(), 2);
        assert_eq!(reporter.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_buffer_reporter_take_drains() {
        let reporter = BufferReporter::new();
        reporter.report_failure("only");

        assert_eq!(reporter.take(), vec!["only"]);
        assert!(reporter.is_empty());
    }

    #[test]
    #[should_panic(expected = "assertion failed: boom")]
    fn test_panic_reporter_escalates() {
        PanicReporter::new().report_failure("boom");
    }

    #[test]
    fn test_call_trace_records_every_call() {
        let trace = CallTrace::new();
        trace.notify_call(&args![1, 2.5]);
        trace.notify_call(&args!["x"]);

        assert_eq!(trace.calls(), vec![args![1, 2.5], args!["x"]]);
    }
}
