//! Fraud domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while assessing fraud risk
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FraudError {
    /// An upstream model produced a score outside `[0, 1]`
    #[error("Signal {field} is outside the range [0, 1]: {value}")]
    InvalidSignalRange { field: &'static str, value: Decimal },

    #[error("Claimed amount cannot be negative: {0}")]
    InvalidClaimAmount(Decimal),

    #[error("Invalid fraud engine configuration: {0}")]
    InvalidConfig(String),
}
