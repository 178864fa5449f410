//! Discrepancy and evidence flags

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{format_amount, CostRange};

/// Category of a reported flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    UnderClaiming,
    OverClaiming,
    NoEvidence,
    LimitedEvidence,
    NearCoverageLimit,
    /// Passed through from the pattern-matching collaborator
    Prior,
}

/// A flag raised by the engine itself, carrying the numbers behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscrepancyFlag {
    /// Claim is far below the assessed damage
    UnderClaiming { claimed: Decimal, estimate: CostRange },
    /// Claim is far above the assessed damage
    OverClaiming { claimed: Decimal, estimate: CostRange },
    NoEvidence,
    LimitedEvidence { image_count: u32 },
    NearCoverageLimit { claimed: Decimal, coverage_limit: Decimal, ratio: Decimal },
}

impl DiscrepancyFlag {
    pub fn kind(&self) -> FlagKind {
        match self {
            DiscrepancyFlag::UnderClaiming { .. } => FlagKind::UnderClaiming,
            DiscrepancyFlag::OverClaiming { .. } => FlagKind::OverClaiming,
            DiscrepancyFlag::NoEvidence => FlagKind::NoEvidence,
            DiscrepancyFlag::LimitedEvidence { .. } => FlagKind::LimitedEvidence,
            DiscrepancyFlag::NearCoverageLimit { .. } => FlagKind::NearCoverageLimit,
        }
    }
}

impl fmt::Display for DiscrepancyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscrepancyFlag::UnderClaiming { claimed, estimate } => write!(
                f,
                "Under-claiming: claimed {} but damage estimate is {}",
                format_amount(*claimed),
                estimate
            ),
            DiscrepancyFlag::OverClaiming { claimed, estimate } => write!(
                f,
                "Over-claiming: claimed {} but damage estimate is {}",
                format_amount(*claimed),
                estimate
            ),
            DiscrepancyFlag::NoEvidence => f.write_str("No evidence: no damage photos submitted"),
            DiscrepancyFlag::LimitedEvidence { image_count } => write!(
                f,
                "Limited evidence: only {} photo{} submitted",
                image_count,
                if *image_count == 1 { "" } else { "s" }
            ),
            DiscrepancyFlag::NearCoverageLimit {
                coverage_limit,
                ratio,
                ..
            } => match ratio.checked_mul(Decimal::ONE_HUNDRED) {
                Some(percent) => write!(
                    f,
                    "Near coverage limit: claim is {}% of the {} policy limit",
                    percent.round_dp(1),
                    format_amount(*coverage_limit)
                ),
                None => write!(
                    f,
                    "Near coverage limit: claim far exceeds the {} policy limit",
                    format_amount(*coverage_limit)
                ),
            },
        }
    }
}

/// A flag as reported in an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub kind: FlagKind,
    /// Human-readable explanation with the concrete figures
    pub detail: String,
}

impl RiskFlag {
    pub fn prior(detail: impl Into<String>) -> Self {
        Self {
            kind: FlagKind::Prior,
            detail: detail.into(),
        }
    }

    /// Returns true for flags raised by the engine rather than passed through
    pub fn is_detected(&self) -> bool {
        self.kind != FlagKind::Prior
    }
}

impl From<&DiscrepancyFlag> for RiskFlag {
    fn from(flag: &DiscrepancyFlag) -> Self {
        Self {
            kind: flag.kind(),
            detail: flag.to_string(),
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}
