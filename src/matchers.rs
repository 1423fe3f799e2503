//! Argument matchers for call verification.
//!
//! A matcher is a predicate over a single argument value paired with a
//! human-readable description. Matchers compose positionally into a tuple
//! (one matcher per parameter) that is tested against a recorded call's
//! arguments: the tuple is satisfied only if every positional matcher
//! accepts the argument at its index.

use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;

/// A predicate over one argument value.
///
/// Matchers are pure: testing a value or requesting a description never
/// mutates any state, and both are idempotent.
///
/// # Example
///
/// ```rust
/// use understudy::{less_than, any};
/// use serde_json::json;
///
/// assert!(less_than(3).matches(&json!(2)));
/// assert!(!less_than(3).matches(&json!(4.5)));
/// assert!(any().matches(&json!("whatever")));
///
/// assert_eq!(less_than(3).describe(), "is < 3");
/// ```
#[derive(Debug, Clone)]
pub enum ArgMatcher {
    /// Matches a value equal to the expected one. Mixed integer/float
    /// arguments compare numerically.
    Eq(Value),
    /// Matches a value strictly less than the bound.
    LessThan(Value),
    /// Matches a value strictly greater than the bound.
    GreaterThan(Value),
    /// Matches a string argument against a regex.
    Matches(Regex),
    /// Matches any value.
    Any,
}

impl ArgMatcher {
    /// Test a single argument value against this matcher.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ArgMatcher::Eq(expected) => values_equal(expected, value),
            ArgMatcher::LessThan(bound) => compare(value, bound) == Some(Ordering::Less),
            ArgMatcher::GreaterThan(bound) => compare(value, bound) == Some(Ordering::Greater),
            ArgMatcher::Matches(pattern) => {
                value.as_str().is_some_and(|s| pattern.is_match(s))
            }
            ArgMatcher::Any => true,
        }
    }

    /// Human-readable fragment describing what this matcher accepts.
    ///
    /// Exact-match descriptions render the expected value directly;
    /// comparison matchers render as `is < 3` / `is > 3`; the wildcard
    /// renders as `anything`.
    pub fn describe(&self) -> String {
        match self {
            ArgMatcher::Eq(expected) => expected.to_string(),
            ArgMatcher::LessThan(bound) => format!("is < {bound}"),
            ArgMatcher::GreaterThan(bound) => format!("is > {bound}"),
            ArgMatcher::Matches(pattern) => format!("matches /{}/", pattern.as_str()),
            ArgMatcher::Any => "anything".to_string(),
        }
    }
}

/// Equality that promotes mixed integer/float numbers before comparing.
fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected.as_f64(), actual.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => expected == actual,
    }
}

/// Ordering between two values: numeric for numbers (integers promote to
/// floats), lexicographic for strings, undefined otherwise.
fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value.as_f64(), bound.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (value.as_str(), bound.as_str()) {
            (Some(a), Some(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}

/// Match a value exactly.
pub fn eq(expected: impl Into<Value>) -> ArgMatcher {
    ArgMatcher::Eq(expected.into())
}

/// Match any value strictly less than `bound`.
pub fn less_than(bound: impl Into<Value>) -> ArgMatcher {
    ArgMatcher::LessThan(bound.into())
}

/// Match any value strictly greater than `bound`.
pub fn greater_than(bound: impl Into<Value>) -> ArgMatcher {
    ArgMatcher::GreaterThan(bound.into())
}

/// Match string arguments against a regex.
///
/// Non-string arguments never match.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex.
pub fn matching(pattern: &str) -> ArgMatcher {
    match Regex::new(pattern) {
        Ok(re) => ArgMatcher::Matches(re),
        Err(err) => panic!("invalid matcher pattern '{pattern}': {err}"),
    }
}

/// Match anything (wildcard).
pub fn any() -> ArgMatcher {
    ArgMatcher::Any
}

/// Test a positional matcher tuple against an argument tuple.
///
/// Satisfied only when the arities agree and every matcher accepts the
/// argument at its position.
pub fn tuple_matches(matchers: &[ArgMatcher], args: &[Value]) -> bool {
    matchers.len() == args.len()
        && matchers.iter().zip(args).all(|(m, arg)| m.matches(arg))
}

/// The fixed failure text for a verification that matched no pending call.
pub(crate) fn no_call_message(matchers: &[ArgMatcher]) -> String {
    let mut message = String::from("No call where arguments:\n");
    for (i, matcher) in matchers.iter().enumerate() {
        message.push_str(&format!("  {}: {}\n", i, matcher.describe()));
    }
    message
}

/// Conversion into an [`ArgMatcher`].
///
/// Bare values convert to exact-equality matchers, so matcher tuples can
/// mix raw values and matchers: `matchers![less_than(8), 4.2]`.
pub trait IntoMatcher {
    fn into_matcher(self) -> ArgMatcher;
}

impl IntoMatcher for ArgMatcher {
    fn into_matcher(self) -> ArgMatcher {
        self
    }
}

impl IntoMatcher for Value {
    fn into_matcher(self) -> ArgMatcher {
        ArgMatcher::Eq(self)
    }
}

macro_rules! impl_into_matcher {
    ($($ty:ty),* $(,)?) => {$(
        impl IntoMatcher for $ty {
            fn into_matcher(self) -> ArgMatcher {
                ArgMatcher::Eq(Value::from(self))
            }
        }
    )*};
}

impl_into_matcher!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, &str, String);

/// Build a positional matcher tuple.
///
/// Elements may be matchers or bare values (which match exactly).
///
/// # Example
///
/// ```rust
/// use understudy::{matchers, less_than, any};
///
/// let tuple = matchers![less_than(8), 4.2, any()];
/// assert_eq!(tuple.len(), 3);
/// ```
#[macro_export]
macro_rules! matchers {
    ($($matcher:expr),* $(,)?) => {
        vec![$($crate::IntoMatcher::into_matcher($matcher)),*]
    };
}

/// Build an argument tuple of values.
///
/// # Example
///
/// ```rust
/// use understudy::args;
///
/// let call_args = args![7, 4.2, "path"];
/// assert_eq!(call_args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Value::from($value)),*]
    };
}
