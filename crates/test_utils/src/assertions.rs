//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{CostRange, Score};
use domain_fraud::{FlagKind, FraudAssessment};
use rust_decimal::Decimal;

/// Asserts that a cost range has the given whole-dollar bounds
pub fn assert_cost_range(actual: &CostRange, min: u32, max: u32) {
    assert!(
        actual.min() == Decimal::from(min) && actual.max() == Decimal::from(max),
        "Cost range mismatch: actual={}, expected=[{}, {}]",
        actual,
        min,
        max
    );
}

/// Asserts that cost ranges sum to a total
///
/// # Panics
///
/// Panics if the elementwise sum doesn't equal the total
pub fn assert_cost_sum_equals(parts: &[CostRange], total: &CostRange) {
    let sum: CostRange = parts.iter().sum();
    assert_eq!(sum, *total, "Sum of parts ({}) doesn't equal total ({})", sum, total);
}

/// Asserts that a score is approximately equal to a decimal
pub fn assert_score_approx_eq(actual: Score, expected: Decimal, tolerance: Decimal) {
    let diff = (actual.value() - expected).abs();
    assert!(
        diff <= tolerance,
        "Scores differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.value(),
        expected,
        diff,
        tolerance
    );
}

/// Asserts that an assessment carries a flag of the given kind
pub fn assert_has_flag(assessment: &FraudAssessment, kind: FlagKind) {
    assert!(
        assessment.flags.iter().any(|flag| flag.kind == kind),
        "Expected a {:?} flag, got {:?}",
        kind,
        assessment.flags
    );
}

/// Asserts that an assessment carries no flag of the given kind
pub fn assert_lacks_flag(assessment: &FraudAssessment, kind: FlagKind) {
    assert!(
        assessment.flags.iter().all(|flag| flag.kind != kind),
        "Unexpected {:?} flag in {:?}",
        kind,
        assessment.flags
    );
}

/// Asserts that a decimal value is within a range
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Decimal {} is not in range [{}, {}]",
        value,
        min,
        max
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
