//! End-to-end verification scenarios: full consumption, teardown
//! reporting, reporter routing, and default-action dispatch.

use understudy::{
    any, args, greater_than, less_than, matchers, BufferReporter, CallTrace, MockFn, Value,
};

#[test]
fn consumed_calls_do_not_fail_at_teardown() {
    let reporter = BufferReporter::new();
    let mock = MockFn::new(2).with_reporter(&reporter);

    mock.call(args![7, 4.2]);
    mock.call(args![-4, 1.1]);

    mock.check_called(matchers![less_than(8), 4.2]);
    mock.require_called(matchers![-4, less_than(2)]);

    drop(mock);
    assert!(reporter.is_empty());
}

#[test]
fn unmatched_calls_surface_verbatim_at_teardown() {
    let reporter = BufferReporter::new();
    let mock = MockFn::new(2).with_reporter(&reporter);

    mock.call(args![2.2, 4]);
    mock.call(args![3.3, -2]);

    // Consumes the first call (2.2 > 2 and 4 > 0); the second stays pending.
    mock.check_called(matchers![greater_than(2), greater_than(0)]);

    drop(mock);
    assert_eq!(
        reporter.messages(),
        vec!["unconsumed call with args:\n  0: 3.3\n  1: -2\n"]
    );
}

#[test]
fn validate_called_failure_text_differs_from_teardown_text() {
    let mock_reporter = BufferReporter::new();
    let mock = MockFn::new(2).with_reporter(&mock_reporter);

    mock.call(args![2.2, 4]);
    mock.call(args![3.3, -2]);

    mock.validate_called(&mock_reporter, matchers![less_than(3), less_than(-2)]);
    assert_eq!(
        mock_reporter.take(),
        vec!["No call where arguments:\n  0: is < 3\n  1: is < -2\n"]
    );

    drop(mock);
    assert_eq!(
        mock_reporter.messages(),
        vec![
            "unconsumed call with args:\n  0: 2.2\n  1: 4\n",
            "unconsumed call with args:\n  0: 3.3\n  1: -2\n",
        ]
    );
}

#[test]
fn unmatched_calls_invoke_the_default_action() {
    let trace = CallTrace::new();
    let fallback = MockFn::new(2);
    let forward = |call_args: &[Value]| fallback.call(call_args.to_vec());

    let mock = MockFn::new(2).with_observer(&trace);
    mock.default_action(&forward);

    mock.call(args![-1.3, -2]);
    mock.call(args![86.9, 18]);

    mock.check_called(matchers![any(), any()]);
    mock.check_called(matchers![any(), any()]);
    drop(mock);

    // Every call appeared exactly once in the fallback's own log.
    fallback.check_called(matchers![86.9, 18]);
    fallback.check_called(matchers![-1.3, -2]);
    assert!(fallback.verify().is_ok());

    // The observer saw both calls too.
    assert_eq!(trace.calls(), vec![args![-1.3, -2], args![86.9, 18]]);
}

#[test]
fn expectations_suppress_default_action_dispatch() {
    let fallback = MockFn::new(2);
    let forward = |call_args: &[Value]| fallback.call(call_args.to_vec());

    let mock = MockFn::new(2);
    mock.default_action(&forward);
    mock.on_call(matchers![1.1, 2]);

    mock.call(args![3.3, 4]);
    mock.call(args![1.1, 2]);

    mock.check_called(matchers![any(), any()]);
    mock.check_called(matchers![any(), any()]);
    drop(mock);

    // Only the unmatched call reached the fallback.
    fallback.check_called(matchers![3.3, 4]);
    assert!(fallback.verify().is_ok());
}

#[test]
fn zero_expectations_route_every_call_to_default_action() {
    let count = std::cell::Cell::new(0usize);
    let bump = |_: &[Value]| count.set(count.get() + 1);

    let mock = MockFn::new(1);
    mock.default_action(&bump);

    mock.call(args![1]);
    mock.call(args![2]);
    mock.call(args![3]);

    assert_eq!(count.get(), 3);

    mock.check_called(matchers![any()]);
    mock.check_called(matchers![any()]);
    mock.check_called(matchers![any()]);
}

#[test]
fn a_mock_can_report_failures_for_another_mock() {
    let reporter_mock = MockFn::new(1);
    let mock = MockFn::new(2).with_reporter(&reporter_mock);

    mock.call(args![2.2, 4]);
    mock.call(args![3.3, -2]);
    mock.check_called(matchers![greater_than(2), greater_than(0)]);
    drop(mock);

    reporter_mock.require_called(matchers![
        "unconsumed call with args:\n  0: 3.3\n  1: -2\n"
    ]);
    assert!(reporter_mock.verify().is_ok());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Each recorded call is consumed at most once, no matter how the
        /// verifications interleave with duplicates.
        #[test]
        fn consumption_is_exclusive(values in prop::collection::vec(-50i64..50, 1..20)) {
            let reporter = BufferReporter::new();
            let mock = MockFn::new(1).with_reporter(&reporter);

            for v in &values {
                mock.call(args![*v]);
            }
            for v in &values {
                mock.check_called(matchers![*v]);
            }

            // Exactly as many consumptions as calls: every further check
            // on any of the values must miss.
            prop_assert!(reporter.is_empty());
            for v in &values {
                let result = mock.evaluate_called(matchers![*v]);
                prop_assert!(!result.passed);
            }

            drop(mock);
            prop_assert!(reporter.is_empty());
        }

        /// Pending calls surface at teardown in invocation order, never
        /// matching order.
        #[test]
        fn teardown_reports_in_invocation_order(values in prop::collection::vec(0i64..1000, 1..20)) {
            let reporter = BufferReporter::new();
            let mock = MockFn::new(1).with_reporter(&reporter);

            for v in &values {
                mock.call(args![*v]);
            }
            drop(mock);

            let expected: Vec<String> = values
                .iter()
                .map(|v| format!("unconsumed call with args:\n  0: {v}\n"))
                .collect();
            prop_assert_eq!(reporter.messages(), expected);
        }
    }
}
