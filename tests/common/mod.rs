//! Shared integration-test helpers.

#![allow(dead_code, unused_macros)]

pub use feedweave::test_utils::{init_test, init_test_logging};

/// Marks a phase inside a longer test.
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = $name, "test phase");
    };
}

/// Marks successful completion of a test.
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = $name, "test complete");
    };
}

/// Asserts `cond`, logging the expected and actual values first.
macro_rules! assert_with_log {
    ($cond:expr, $label:expr, $expected:expr, $actual:expr) => {{
        let expected = &$expected;
        let actual = &$actual;
        tracing::debug!(
            label = $label,
            expected = ?expected,
            actual = ?actual,
            "assertion"
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $label, expected, actual);
    }};
}
