//! Error type for explicit mock verification.

use serde_json::Value;
use thiserror::Error;

use crate::log::unconsumed_message;

/// Returned by [`MockFn::verify`](crate::MockFn::verify) when recorded
/// calls were never consumed.
///
/// The display lists every pending call in invocation order, using the
/// same rendering as the teardown report.
#[derive(Debug, Clone, Error)]
#[error("{}", render_unconsumed(.unconsumed))]
pub struct VerifyError {
    /// Argument tuples of the pending calls, in invocation order.
    pub unconsumed: Vec<Vec<Value>>,
}

impl VerifyError {
    /// Number of calls that were never consumed.
    pub fn count(&self) -> usize {
        self.unconsumed.len()
    }
}

fn render_unconsumed(calls: &[Vec<Value>]) -> String {
    let mut out = format!("{} unconsumed call(s):\n", calls.len());
    for args in calls {
        out.push_str(&unconsumed_message(args));
    }
    out
}
