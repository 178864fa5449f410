//! Probability scores in the unit interval

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised when a score falls outside `[0, 1]`
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Score {0} is outside the range [0, 1]")]
pub struct ScoreError(pub Decimal);

/// A decimal probability in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Score(Decimal);

impl Score {
    pub const ZERO: Score = Score(Decimal::ZERO);
    pub const ONE: Score = Score(Decimal::ONE);

    /// Creates a score, rejecting values outside `[0, 1]`
    pub fn new(value: Decimal) -> Result<Self, ScoreError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ScoreError(value));
        }
        Ok(Self(value))
    }

    /// Creates a score, clamping the value into `[0, 1]`
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Returns the underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the score as a percentage (0-100)
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for Score {
    type Error = ScoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for Decimal {
    fn from(score: Score) -> Decimal {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(1))
    }
}
