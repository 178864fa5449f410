//! Damage domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when constructing damage findings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DamageError {
    #[error("Severity score {0} is outside the range [0, 100]")]
    SeverityScoreOutOfRange(Decimal),
}
