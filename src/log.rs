//! Append-only log of recorded calls.
//!
//! Every invocation of a mock appends one [`CallRecord`] here. Records are
//! never removed or reordered; verification marks them consumed in place,
//! so the log's order is always invocation order.

use serde_json::Value;

use crate::matchers::{tuple_matches, ArgMatcher};

/// An immutable snapshot of one invocation's arguments, tagged as
/// consumed or pending.
///
/// A record starts pending and flips to consumed exactly once, when a
/// verification matches it. A consumed record can never be matched again.
#[derive(Debug, Clone)]
pub struct CallRecord {
    args: Vec<Value>,
    consumed: bool,
}

impl CallRecord {
    fn new(args: Vec<Value>) -> Self {
        Self {
            args,
            consumed: false,
        }
    }

    /// The argument tuple captured at invocation time.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Whether a verification has already matched this record.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Ordered, append-only store of call records scoped to one mock.
#[derive(Debug, Default)]
pub struct CallLog {
    records: Vec<CallRecord>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new pending record. Never fails.
    pub fn record(&mut self, args: Vec<Value>) {
        self.records.push(CallRecord::new(args));
    }

    /// Scan records in invocation order and consume the first pending one
    /// whose arguments satisfy the matcher tuple.
    ///
    /// First-match semantics: the earliest satisfying pending record is
    /// consumed, not the closest match. Returns `false` if none satisfy.
    pub fn find_and_consume(&mut self, matchers: &[ArgMatcher]) -> bool {
        for record in &mut self.records {
            if !record.consumed && tuple_matches(matchers, &record.args) {
                record.consumed = true;
                return true;
            }
        }
        false
    }

    /// Argument tuples of every still-pending record, in invocation order.
    pub fn drain_unconsumed(&self) -> Vec<Vec<Value>> {
        self.records
            .iter()
            .filter(|record| !record.consumed)
            .map(|record| record.args.clone())
            .collect()
    }

    /// All records, in invocation order.
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Number of recorded calls (consumed or not).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The fixed teardown text for one pending record, rendering raw values.
pub(crate) fn unconsumed_message(args: &[Value]) -> String {
    let mut message = String::from("unconsumed call with args:\n");
    for (i, arg) in args.iter().enumerate() {
        message.push_str(&format!("  {i}: {arg}\n"));
    }
    message
}
