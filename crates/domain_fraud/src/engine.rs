//! Fraud risk engine
//!
//! Combines claim facts, the damage summary, and upstream model signals into a
//! [`FraudAssessment`]. The engine holds only its configuration; every call is
//! a pure function of its arguments.
//!
//! # Steps
//!
//! 1. Claimed-vs-assessed discrepancy (only when damage was assessed)
//! 2. Evidence sufficiency
//! 3. Coverage ratio (only with a positive coverage limit)
//! 4. Base score `ml * 0.6 + graph * 0.4`, escalated by 0.15 when any flag fired
//! 5. Risk tier
//! 6. Recommendation

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::Score;
use domain_damage::ClaimDamageSummary;

use crate::assessment::FraudAssessment;
use crate::config::FraudEngineConfig;
use crate::error::FraudError;
use crate::flags::{DiscrepancyFlag, RiskFlag};
use crate::signal::{ClaimFacts, FraudSignal};

/// Fuses risk signals into an assessment
#[derive(Debug, Clone)]
pub struct FraudRiskEngine {
    config: FraudEngineConfig,
}

impl Default for FraudRiskEngine {
    fn default() -> Self {
        Self {
            config: FraudEngineConfig::default(),
        }
    }
}

impl FraudRiskEngine {
    /// Creates an engine after validating its configuration
    pub fn new(config: FraudEngineConfig) -> Result<Self, FraudError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FraudEngineConfig {
        &self.config
    }

    /// Assesses a claim
    ///
    /// # Errors
    ///
    /// * [`FraudError::InvalidSignalRange`] if any signal score lies outside `[0, 1]`
    /// * [`FraudError::InvalidClaimAmount`] if the claimed amount is negative
    pub fn assess(
        &self,
        facts: &ClaimFacts,
        summary: &ClaimDamageSummary,
        signal: &FraudSignal,
    ) -> Result<FraudAssessment, FraudError> {
        let scores = signal.scores()?;
        if facts.claimed_amount < Decimal::ZERO {
            return Err(FraudError::InvalidClaimAmount(facts.claimed_amount));
        }

        let detected = self.detect_flags(facts, summary);
        let base_score = self.base_score(scores.ml_model, scores.graph_network);
        let escalated = !detected.is_empty();
        let composite_score = self.escalate(base_score, escalated);

        let risk_level = self.config.tiers.classify(composite_score);
        let recommendation = self.config.decision.recommend(composite_score, detected.len());
        let recommended_action = self.config.action_for(composite_score);
        let suspicious = composite_score.value() >= self.config.decision.review_score;

        let flags: Vec<RiskFlag> = detected
            .iter()
            .map(RiskFlag::from)
            .chain(signal.distinct_prior_flags().into_iter().map(RiskFlag::prior))
            .collect();

        debug!(
            base = %base_score.value(),
            composite = %composite_score.value(),
            detected = detected.len(),
            flags = flags.len(),
            %risk_level,
            %recommendation,
            "Fraud risk assessed"
        );

        Ok(FraudAssessment {
            composite_score,
            base_score,
            escalated,
            risk_level,
            flags,
            detected_flag_count: detected.len(),
            recommendation,
            recommended_action,
            suspicious,
            pattern_matching_score: scores.pattern_matching,
        })
    }

    /// Runs the discrepancy, evidence, and coverage checks in order
    pub fn detect_flags(&self, facts: &ClaimFacts, summary: &ClaimDamageSummary) -> Vec<DiscrepancyFlag> {
        let mut flags = Vec::new();
        let claimed = facts.claimed_amount;

        if summary.is_assessed() {
            let estimate = summary.total_cost;
            // Thresholds that overflow skip the check.
            let under_threshold = estimate.min().checked_mul(self.config.under_claim_factor);
            let over_threshold = estimate.max().checked_mul(self.config.over_claim_factor);
            if under_threshold.is_some_and(|threshold| claimed < threshold) {
                flags.push(DiscrepancyFlag::UnderClaiming { claimed, estimate });
            } else if over_threshold.is_some_and(|threshold| claimed > threshold) {
                flags.push(DiscrepancyFlag::OverClaiming { claimed, estimate });
            }
        }

        if summary.image_count == 0 {
            flags.push(DiscrepancyFlag::NoEvidence);
        } else if summary.image_count < self.config.min_images {
            flags.push(DiscrepancyFlag::LimitedEvidence {
                image_count: summary.image_count,
            });
        }

        if let Some(ratio) = facts.coverage_ratio() {
            if ratio > self.config.coverage_ratio_limit {
                flags.push(DiscrepancyFlag::NearCoverageLimit {
                    claimed,
                    coverage_limit: facts.coverage_limit,
                    ratio,
                });
            }
        }

        flags
    }

    /// Weighted blend of the ML and graph scores
    pub fn base_score(&self, ml_model: Score, graph_network: Score) -> Score {
        Score::clamped(
            self.config.ml_weight * ml_model.value() + self.config.graph_weight * graph_network.value(),
        )
    }

    /// Adds the escalation bump when flags fired, capped at 1
    pub fn escalate(&self, base: Score, flagged: bool) -> Score {
        if flagged {
            Score::clamped(base.value() + self.config.escalation)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{Recommendation, RiskLevel};
    use crate::flags::FlagKind;
    use core_kernel::CostRange;
    use rust_decimal_macros::dec;

    fn summary(min: u32, max: u32, images: u32) -> ClaimDamageSummary {
        let mut summary = ClaimDamageSummary::no_assessment(images);
        summary.analyzed_count = images;
        summary.total_cost = CostRange::from_whole(min, max).unwrap();
        summary
    }

    #[test]
    fn test_base_score_weights() {
        let engine = FraudRiskEngine::default();
        let base = engine.base_score(Score::new(dec!(0.5)).unwrap(), Score::new(dec!(0.3)).unwrap());
        assert_eq!(base.value(), dec!(0.42));
    }

    #[test]
    fn test_escalation_is_capped() {
        let engine = FraudRiskEngine::default();
        let escalated = engine.escalate(Score::new(dec!(0.95)).unwrap(), true);
        assert_eq!(escalated, Score::ONE);
    }

    #[test]
    fn test_claim_within_estimate_has_no_discrepancy() {
        let engine = FraudRiskEngine::default();
        let facts = ClaimFacts::new(dec!(6000), dec!(50000));
        assert!(engine.detect_flags(&facts, &summary(4000, 9000, 3)).is_empty());
    }

    #[test]
    fn test_threshold_edges_do_not_fire() {
        let engine = FraudRiskEngine::default();
        // Exactly half the minimum and exactly 1.5x the maximum.
        let at_under = ClaimFacts::new(dec!(2000), dec!(0));
        let at_over = ClaimFacts::new(dec!(13500), dec!(0));
        assert!(engine.detect_flags(&at_under, &summary(4000, 9000, 2)).is_empty());
        assert!(engine.detect_flags(&at_over, &summary(4000, 9000, 2)).is_empty());
    }

    #[test]
    fn test_discrepancy_skipped_without_assessment() {
        let engine = FraudRiskEngine::default();
        let facts = ClaimFacts::new(dec!(1000000), dec!(0));
        let flags = engine.detect_flags(&facts, &ClaimDamageSummary::no_assessment(4));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_coverage_ratio_exactly_at_limit_does_not_fire() {
        let engine = FraudRiskEngine::default();
        let facts = ClaimFacts::new(dec!(9500), dec!(10000));
        let flags = engine.detect_flags(&facts, &summary(6000, 9000, 2));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flag_order_follows_steps() {
        let engine = FraudRiskEngine::default();
        let facts = ClaimFacts::new(dec!(20000), dec!(20000));
        let flags = engine.detect_flags(&facts, &summary(1000, 2000, 1));
        let kinds: Vec<FlagKind> = flags.iter().map(DiscrepancyFlag::kind).collect();

        assert_eq!(
            kinds,
            vec![FlagKind::OverClaiming, FlagKind::LimitedEvidence, FlagKind::NearCoverageLimit]
        );
    }

    #[test]
    fn test_invalid_claim_amount_rejected() {
        let engine = FraudRiskEngine::default();
        let result = engine.assess(
            &ClaimFacts::new(dec!(-1), dec!(1000)),
            &summary(100, 200, 2),
            &FraudSignal::default(),
        );
        assert_eq!(result, Err(FraudError::InvalidClaimAmount(dec!(-1))));
    }

    #[test]
    fn test_clean_claim_is_approved() {
        let engine = FraudRiskEngine::default();
        let assessment = engine
            .assess(
                &ClaimFacts::new(dec!(5000), dec!(50000)),
                &summary(4000, 9000, 3),
                &FraudSignal::new(dec!(0.1), dec!(0.2), dec!(0.05)),
            )
            .unwrap();

        assert!(!assessment.escalated);
        assert_eq!(assessment.composite_score.value(), dec!(0.14));
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.recommendation, Recommendation::Approve);
        assert!(assessment.flags.is_empty());
    }
}
