//! Fraud engine tuning parameters

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Score;

use crate::assessment::{Recommendation, RecommendedAction, RiskLevel};
use crate::error::FraudError;

/// Score cut-offs for the four risk tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub critical: Decimal,
    pub high: Decimal,
    pub medium: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical: dec!(0.8),
            high: dec!(0.6),
            medium: dec!(0.3),
        }
    }
}

impl RiskThresholds {
    /// Maps a final score to its tier
    pub fn classify(&self, score: Score) -> RiskLevel {
        let value = score.value();
        if value >= self.critical {
            RiskLevel::Critical
        } else if value >= self.high {
            RiskLevel::High
        } else if value >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Cut-offs that turn a score and a flag count into a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    pub deny_score: Decimal,
    pub deny_flag_count: usize,
    pub review_score: Decimal,
    pub review_flag_count: usize,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            deny_score: dec!(0.8),
            deny_flag_count: 2,
            review_score: dec!(0.5),
            review_flag_count: 1,
        }
    }
}

impl DecisionPolicy {
    /// Deny beats manual review beats approve
    pub fn recommend(&self, score: Score, detected_flags: usize) -> Recommendation {
        let value = score.value();
        if detected_flags >= self.deny_flag_count || value >= self.deny_score {
            Recommendation::Deny
        } else if detected_flags >= self.review_flag_count || value >= self.review_score {
            Recommendation::ManualReview
        } else {
            Recommendation::Approve
        }
    }
}

/// All tunable constants of the fraud engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudEngineConfig {
    /// Weight of the ML model score in the base score
    pub ml_weight: Decimal,
    /// Weight of the graph network score in the base score
    pub graph_weight: Decimal,
    /// Added to the base score when any flag is detected
    pub escalation: Decimal,
    /// Claims below `min estimate * factor` are under-claims
    pub under_claim_factor: Decimal,
    /// Claims above `max estimate * factor` are over-claims
    pub over_claim_factor: Decimal,
    /// Claimed share of the coverage limit above which a claim is flagged
    pub coverage_ratio_limit: Decimal,
    /// Fewer attached images than this is limited evidence
    pub min_images: u32,
    pub tiers: RiskThresholds,
    pub decision: DecisionPolicy,
}

impl Default for FraudEngineConfig {
    fn default() -> Self {
        Self {
            ml_weight: dec!(0.6),
            graph_weight: dec!(0.4),
            escalation: dec!(0.15),
            under_claim_factor: dec!(0.5),
            over_claim_factor: dec!(1.5),
            coverage_ratio_limit: dec!(0.95),
            min_images: 2,
            tiers: RiskThresholds::default(),
            decision: DecisionPolicy::default(),
        }
    }
}

impl FraudEngineConfig {
    /// Checks that the configuration keeps scores in `[0, 1]` and that
    /// tiers and decisions are ordered
    pub fn validate(&self) -> Result<(), FraudError> {
        let unit = |name: &str, value: Decimal| {
            if value < Decimal::ZERO || value > Decimal::ONE {
                Err(FraudError::InvalidConfig(format!("{name} must be within [0, 1], got {value}")))
            } else {
                Ok(())
            }
        };

        unit("ml_weight", self.ml_weight)?;
        unit("graph_weight", self.graph_weight)?;
        unit("escalation", self.escalation)?;
        if self.ml_weight + self.graph_weight > Decimal::ONE {
            return Err(FraudError::InvalidConfig(
                "ml_weight + graph_weight must not exceed 1".to_string(),
            ));
        }

        if self.under_claim_factor <= Decimal::ZERO || self.over_claim_factor < Decimal::ONE {
            return Err(FraudError::InvalidConfig(
                "under_claim_factor must be positive and over_claim_factor at least 1".to_string(),
            ));
        }
        if self.under_claim_factor > Decimal::ONE {
            return Err(FraudError::InvalidConfig(
                "under_claim_factor must not exceed 1".to_string(),
            ));
        }
        if self.coverage_ratio_limit <= Decimal::ZERO {
            return Err(FraudError::InvalidConfig(
                "coverage_ratio_limit must be positive".to_string(),
            ));
        }

        let tiers = &self.tiers;
        unit("tiers.critical", tiers.critical)?;
        if !(tiers.critical > tiers.high && tiers.high > tiers.medium && tiers.medium > Decimal::ZERO) {
            return Err(FraudError::InvalidConfig(
                "tier thresholds must be strictly descending: critical > high > medium > 0".to_string(),
            ));
        }

        let decision = &self.decision;
        unit("decision.deny_score", decision.deny_score)?;
        unit("decision.review_score", decision.review_score)?;
        if decision.review_score > decision.deny_score {
            return Err(FraudError::InvalidConfig(
                "decision.review_score must not exceed decision.deny_score".to_string(),
            ));
        }
        if decision.review_flag_count == 0 || decision.review_flag_count > decision.deny_flag_count {
            return Err(FraudError::InvalidConfig(
                "decision flag counts must satisfy 1 <= review_flag_count <= deny_flag_count".to_string(),
            ));
        }

        Ok(())
    }

    /// Handling priority derived from the final score
    pub fn action_for(&self, score: Score) -> RecommendedAction {
        let value = score.value();
        if value >= self.decision.deny_score {
            RecommendedAction::ImmediateInvestigation
        } else if value >= self.decision.review_score {
            RecommendedAction::DetailedReview
        } else if value >= self.tiers.medium {
            RecommendedAction::FlagForMonitoring
        } else {
            RecommendedAction::NormalProcessing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: Decimal) -> Score {
        Score::new(value).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FraudEngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let tiers = RiskThresholds::default();
        assert_eq!(tiers.classify(score(dec!(0.8))), RiskLevel::Critical);
        assert_eq!(tiers.classify(score(dec!(0.7999))), RiskLevel::High);
        assert_eq!(tiers.classify(score(dec!(0.6))), RiskLevel::High);
        assert_eq!(tiers.classify(score(dec!(0.59))), RiskLevel::Medium);
        assert_eq!(tiers.classify(score(dec!(0.3))), RiskLevel::Medium);
        assert_eq!(tiers.classify(score(dec!(0.29))), RiskLevel::Low);
    }

    #[test]
    fn test_decision_policy() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.recommend(score(dec!(0.1)), 0), Recommendation::Approve);
        assert_eq!(policy.recommend(score(dec!(0.5)), 0), Recommendation::ManualReview);
        assert_eq!(policy.recommend(score(dec!(0.1)), 1), Recommendation::ManualReview);
        assert_eq!(policy.recommend(score(dec!(0.1)), 2), Recommendation::Deny);
        assert_eq!(policy.recommend(score(dec!(0.8)), 0), Recommendation::Deny);
    }

    #[test]
    fn test_weights_exceeding_one_rejected() {
        let config = FraudEngineConfig {
            ml_weight: dec!(0.7),
            graph_weight: dec!(0.4),
            ..FraudEngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(FraudError::InvalidConfig(_))));
    }

    #[test]
    fn test_unordered_tiers_rejected() {
        let config = FraudEngineConfig {
            tiers: RiskThresholds {
                critical: dec!(0.8),
                high: dec!(0.8),
                medium: dec!(0.3),
            },
            ..FraudEngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_review_above_deny_rejected() {
        let config = FraudEngineConfig {
            decision: DecisionPolicy {
                review_score: dec!(0.9),
                ..DecisionPolicy::default()
            },
            ..FraudEngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recommended_actions() {
        let config = FraudEngineConfig::default();
        assert_eq!(config.action_for(score(dec!(0.85))), RecommendedAction::ImmediateInvestigation);
        assert_eq!(config.action_for(score(dec!(0.57))), RecommendedAction::DetailedReview);
        assert_eq!(config.action_for(score(dec!(0.42))), RecommendedAction::FlagForMonitoring);
        assert_eq!(config.action_for(score(dec!(0.1))), RecommendedAction::NormalProcessing);
    }
}
