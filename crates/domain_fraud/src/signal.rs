//! Inputs supplied by upstream collaborators

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Score;

use crate::error::FraudError;

/// Model-derived fraud signals for one claim
///
/// Scores are kept as raw decimals so that an out-of-range value from an
/// upstream model surfaces as [`FraudError::InvalidSignalRange`] instead of
/// being silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FraudSignal {
    /// Classifier fraud probability
    pub ml_model_score: Decimal,
    /// Claimant/vehicle/shop network analysis score
    pub graph_network_score: Decimal,
    /// Rule-based pattern detection score
    pub pattern_matching_score: Decimal,
    /// Historical red flags, e.g. `frequent_claims`, `suspicious_shop`
    #[serde(default)]
    pub prior_flags: Vec<String>,
}

/// Signal scores after range validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalScores {
    pub ml_model: Score,
    pub graph_network: Score,
    pub pattern_matching: Score,
}

impl FraudSignal {
    pub fn new(ml_model_score: Decimal, graph_network_score: Decimal, pattern_matching_score: Decimal) -> Self {
        Self {
            ml_model_score,
            graph_network_score,
            pattern_matching_score,
            prior_flags: Vec::new(),
        }
    }

    pub fn with_prior_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prior_flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Validates every score against `[0, 1]`
    pub fn scores(&self) -> Result<SignalScores, FraudError> {
        Ok(SignalScores {
            ml_model: checked("ml_model_score", self.ml_model_score)?,
            graph_network: checked("graph_network_score", self.graph_network_score)?,
            pattern_matching: checked("pattern_matching_score", self.pattern_matching_score)?,
        })
    }

    /// Prior flags in order, without blanks or repeats
    pub fn distinct_prior_flags(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.prior_flags.len());
        for flag in &self.prior_flags {
            let flag = flag.trim();
            if !flag.is_empty() && !seen.contains(&flag) {
                seen.push(flag);
            }
        }
        seen
    }
}

fn checked(field: &'static str, value: Decimal) -> Result<Score, FraudError> {
    Score::new(value).map_err(|_| FraudError::InvalidSignalRange { field, value })
}

/// Claim and policy facts from the claim store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFacts {
    /// Amount the claimant is asking for
    pub claimed_amount: Decimal,
    /// Policy coverage limit; zero or negative disables the coverage check
    pub coverage_limit: Decimal,
}

impl ClaimFacts {
    pub fn new(claimed_amount: Decimal, coverage_limit: Decimal) -> Self {
        Self {
            claimed_amount,
            coverage_limit,
        }
    }

    /// Claimed share of the coverage limit, if a positive limit is set
    ///
    /// A ratio too large to represent saturates at `Decimal::MAX`.
    pub fn coverage_ratio(&self) -> Option<Decimal> {
        if self.coverage_limit > Decimal::ZERO {
            Some(
                self.claimed_amount
                    .checked_div(self.coverage_limit)
                    .unwrap_or(Decimal::MAX),
            )
        } else {
            None
        }
    }
}
