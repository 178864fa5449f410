//! Fraud assessment outcome

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::Score;

use crate::flags::RiskFlag;

/// Risk tier derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Claim decision, ordered from lax to strict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    ManualReview,
    Deny,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::Approve => "approve",
            Recommendation::ManualReview => "manual_review",
            Recommendation::Deny => "deny",
        };
        f.write_str(label)
    }
}

/// Handling priority for the special investigations unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    NormalProcessing,
    FlagForMonitoring,
    DetailedReview,
    ImmediateInvestigation,
}

/// Result of fusing all risk signals for a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Final score after escalation, clamped to `[0, 1]`
    pub composite_score: Score,
    /// Weighted model/graph score before escalation
    pub base_score: Score,
    pub escalated: bool,
    pub risk_level: RiskLevel,
    /// Detected flags in detection order, then prior flags
    pub flags: Vec<RiskFlag>,
    pub detected_flag_count: usize,
    pub recommendation: Recommendation,
    pub recommended_action: RecommendedAction,
    /// Final score reached the configured review threshold
    pub suspicious: bool,
    pub pattern_matching_score: Score,
}

impl FraudAssessment {
    /// Returns true once the final score reaches the review threshold
    pub fn is_suspicious(&self) -> bool {
        self.suspicious
    }

    /// Flags raised by the engine
    pub fn detected_flags(&self) -> impl Iterator<Item = &RiskFlag> {
        self.flags.iter().filter(|flag| flag.is_detected())
    }

    /// Flags passed through from upstream pattern matching
    pub fn prior_flags(&self) -> impl Iterator<Item = &RiskFlag> {
        self.flags.iter().filter(|flag| !flag.is_detected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_ordering() {
        assert!(Recommendation::Approve < Recommendation::ManualReview);
        assert!(Recommendation::ManualReview < Recommendation::Deny);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&Recommendation::ManualReview).unwrap(),
            "\"manual_review\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"critical\"");
        assert_eq!(
            serde_json::to_string(&RecommendedAction::FlagForMonitoring).unwrap(),
            "\"flag_for_monitoring\""
        );
    }
}
