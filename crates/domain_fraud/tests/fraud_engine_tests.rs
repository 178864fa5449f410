//! Comprehensive tests for domain_fraud

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_damage::DamageAggregator;
use domain_fraud::{
    ClaimFacts, FlagKind, FraudEngineConfig, FraudError, FraudRiskEngine, FraudSignal,
    Recommendation, RecommendedAction, RiskLevel, RiskThresholds,
};
use test_utils::{
    assert_err_variant, assert_has_flag, assert_lacks_flag, assert_ok, assert_score_approx_eq,
    claim_facts_strategy, unit_decimal_strategy, ClaimDamageSummaryBuilder, ClaimFixtures,
    DescriptorFixtures, FraudSignalBuilder, SignalFixtures,
};

fn engine() -> FraudRiskEngine {
    FraudRiskEngine::default()
}

// ============================================================================
// Discrepancy Tests
// ============================================================================

mod discrepancy_tests {
    use super::*;

    #[test]
    fn test_under_claiming_detected() {
        let summary = ClaimDamageSummaryBuilder::new().with_total_cost(4000, 9000).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(1000)),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert_has_flag(&assessment, FlagKind::UnderClaiming);
        assert_lacks_flag(&assessment, FlagKind::OverClaiming);
        assert_eq!(
            assessment.flags[0].detail,
            "Under-claiming: claimed $1,000.00 but damage estimate is $4,000.00–$9,000.00"
        );
    }

    #[test]
    fn test_over_claiming_escalates_to_manual_review() {
        let summary = ClaimDamageSummaryBuilder::new().with_total_cost(4000, 9000).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(30000)),
            &summary,
            &SignalFixtures::moderate(),
        ));

        assert_eq!(assessment.base_score.value(), dec!(0.42));
        assert!(assessment.escalated);
        assert_eq!(assessment.composite_score.value(), dec!(0.57));
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(assessment.recommendation, Recommendation::ManualReview);
        assert_eq!(assessment.recommended_action, RecommendedAction::DetailedReview);
        assert_eq!(assessment.detected_flag_count, 1);
        assert!(assessment.is_suspicious());
    }

    #[test]
    fn test_unassessed_claim_skips_discrepancy() {
        let summary = ClaimDamageSummaryBuilder::new().with_images(3).unassessed().build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(75000)),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert!(assessment.flags.is_empty());
        assert_eq!(assessment.recommendation, Recommendation::Approve);
    }
}

// ============================================================================
// Evidence and Coverage Tests
// ============================================================================

mod evidence_tests {
    use super::*;

    #[test]
    fn test_no_images_flags_no_evidence_regardless_of_scores() {
        let summary = DamageAggregator::new().aggregate(&[], 0);
        let signal = FraudSignalBuilder::new().build();
        let assessment = assert_ok!(engine().assess(&ClaimFixtures::claimed(dec!(500)), &summary, &signal));

        assert_has_flag(&assessment, FlagKind::NoEvidence);
        assert_eq!(assessment.composite_score.value(), dec!(0.15));
        assert_eq!(assessment.recommendation, Recommendation::ManualReview);
    }

    #[test]
    fn test_single_image_is_limited_evidence() {
        let summary = DamageAggregator::new().aggregate(&[DescriptorFixtures::front_end_scuff()], 1);
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(2500)),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert_has_flag(&assessment, FlagKind::LimitedEvidence);
        assert_eq!(assessment.flags[0].detail, "Limited evidence: only 1 photo submitted");
    }

    #[test]
    fn test_near_coverage_limit() {
        let summary = ClaimDamageSummaryBuilder::new().with_total_cost(7000, 12000).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::near_limit(),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert_has_flag(&assessment, FlagKind::NearCoverageLimit);
        assert_eq!(assessment.detected_flag_count, 1);
    }

    #[test]
    fn test_zero_coverage_limit_disables_check() {
        let summary = ClaimDamageSummaryBuilder::new().with_total_cost(7000, 12000).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFacts::new(dec!(9800), Decimal::ZERO),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert_lacks_flag(&assessment, FlagKind::NearCoverageLimit);
    }

    #[test]
    fn test_two_detected_flags_deny() {
        let assessment = assert_ok!(engine().assess(
            &ClaimFacts::new(dec!(20000), dec!(20000)),
            &ClaimDamageSummaryBuilder::new().with_total_cost(1000, 2000).build(),
            &SignalFixtures::clean(),
        ));

        assert_eq!(assessment.detected_flag_count, 2);
        assert_eq!(assessment.recommendation, Recommendation::Deny);
    }
}

// ============================================================================
// Extreme Amount Tests
// ============================================================================

mod extreme_amount_tests {
    use super::*;
    use core_kernel::CostRange;
    use domain_damage::ClaimDamageSummary;

    #[test]
    fn test_unrepresentable_coverage_ratio_exceeds_limit() {
        let facts = ClaimFacts::new(Decimal::from(10_u64.pow(19)), Decimal::new(1, 10));
        let assessment = assert_ok!(engine().assess(
            &facts,
            &ClaimDamageSummary::no_assessment(2),
            &FraudSignal::default(),
        ));

        assert_has_flag(&assessment, FlagKind::NearCoverageLimit);
        assert_eq!(assessment.detected_flag_count, 1);
        assert!(assessment.flags[0].detail.contains("far exceeds"));
        assert_eq!(assessment.recommendation, Recommendation::ManualReview);
    }

    #[test]
    fn test_overflowing_estimate_skips_over_claim_check() {
        let mut summary = ClaimDamageSummaryBuilder::new().build();
        summary.total_cost = CostRange::new(Decimal::ZERO, Decimal::MAX).unwrap();

        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(30000)),
            &summary,
            &SignalFixtures::clean(),
        ));

        assert_lacks_flag(&assessment, FlagKind::OverClaiming);
        assert_lacks_flag(&assessment, FlagKind::UnderClaiming);
        assert_eq!(assessment.detected_flag_count, 0);
    }
}

// ============================================================================
// Prior Flag Tests
// ============================================================================

mod prior_flag_tests {
    use super::*;

    #[test]
    fn test_prior_flags_follow_detected_flags() {
        let summary = ClaimDamageSummaryBuilder::new().with_images(1).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(6000)),
            &summary,
            &SignalFixtures::suspicious(),
        ));

        let kinds: Vec<FlagKind> = assessment.flags.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FlagKind::LimitedEvidence, FlagKind::Prior, FlagKind::Prior]);
        assert_eq!(assessment.prior_flags().count(), 2);
        assert_eq!(assessment.detected_flags().count(), 1);
    }

    #[test]
    fn test_prior_flags_alone_do_not_escalate() {
        let signal = FraudSignalBuilder::new()
            .with_ml_score(dec!(0.2))
            .with_graph_score(dec!(0.2))
            .with_prior_flag("frequent_claims")
            .with_prior_flag("suspicious_shop")
            .build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(6000)),
            &ClaimDamageSummaryBuilder::new().build(),
            &signal,
        ));

        assert!(!assessment.escalated);
        assert_eq!(assessment.detected_flag_count, 0);
        assert_eq!(assessment.recommendation, Recommendation::Approve);
        assert_eq!(assessment.flags.len(), 2);
    }

    #[test]
    fn test_pattern_score_is_reported_but_not_weighted() {
        let signal = FraudSignalBuilder::new().with_pattern_score(dec!(0.99)).build();
        let assessment = assert_ok!(engine().assess(
            &ClaimFixtures::claimed(dec!(6000)),
            &ClaimDamageSummaryBuilder::new().build(),
            &signal,
        ));

        assert_eq!(assessment.pattern_matching_score.value(), dec!(0.99));
        assert_eq!(assessment.composite_score.value(), Decimal::ZERO);
    }
}

// ============================================================================
// Error and Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_out_of_range_signal_rejected() {
        let signal = FraudSignal::new(dec!(1.5), dec!(0.2), dec!(0.1));
        assert_err_variant!(
            engine().assess(&ClaimFixtures::claimed(dec!(100)), &ClaimDamageSummaryBuilder::new().build(), &signal),
            FraudError::InvalidSignalRange { field: "ml_model_score", .. }
        );
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = FraudEngineConfig {
            tiers: RiskThresholds {
                critical: dec!(0.3),
                high: dec!(0.6),
                medium: dec!(0.8),
            },
            ..FraudEngineConfig::default()
        };
        assert_err_variant!(FraudRiskEngine::new(config), FraudError::InvalidConfig(_));
    }

    #[test]
    fn test_custom_escalation() {
        let config = FraudEngineConfig {
            escalation: dec!(0.3),
            ..FraudEngineConfig::default()
        };
        let engine = assert_ok!(FraudRiskEngine::new(config));
        let assessment = assert_ok!(engine.assess(
            &ClaimFixtures::claimed(dec!(30000)),
            &ClaimDamageSummaryBuilder::new().with_total_cost(4000, 9000).build(),
            &SignalFixtures::moderate(),
        ));

        assert_score_approx_eq(assessment.composite_score, dec!(0.72), dec!(0));
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_suspicion_follows_review_threshold() {
        let mut config = FraudEngineConfig::default();
        config.decision.review_score = dec!(0.4);
        let lenient = assert_ok!(FraudRiskEngine::new(config));

        let assessment = assert_ok!(lenient.assess(
            &ClaimFixtures::claimed(dec!(6000)),
            &ClaimDamageSummaryBuilder::new().build(),
            &SignalFixtures::moderate(),
        ));
        assert_eq!(assessment.composite_score.value(), dec!(0.42));
        assert!(assessment.is_suspicious());
        assert_eq!(assessment.recommendation, Recommendation::ManualReview);

        let mut config = FraudEngineConfig::default();
        config.decision.review_score = dec!(0.7);
        let strict = assert_ok!(FraudRiskEngine::new(config));

        let assessment = assert_ok!(strict.assess(
            &ClaimFixtures::claimed(dec!(30000)),
            &ClaimDamageSummaryBuilder::new().with_total_cost(4000, 9000).build(),
            &SignalFixtures::moderate(),
        ));
        assert_eq!(assessment.composite_score.value(), dec!(0.57));
        assert!(!assessment.is_suspicious());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;

    proptest! {
        #[test]
        fn test_composite_monotone_in_model_scores(
            facts in claim_facts_strategy(),
            ml in unit_decimal_strategy(),
            graph in unit_decimal_strategy(),
            ml_bump in unit_decimal_strategy(),
            graph_bump in unit_decimal_strategy(),
        ) {
            let summary = ClaimDamageSummaryBuilder::new().build();
            let low = FraudSignal::new(ml, graph, Decimal::ZERO);
            let high = FraudSignal::new(
                (ml + ml_bump).min(Decimal::ONE),
                (graph + graph_bump).min(Decimal::ONE),
                Decimal::ZERO,
            );

            let before = engine().assess(&facts, &summary, &low).unwrap();
            let after = engine().assess(&facts, &summary, &high).unwrap();

            prop_assert!(after.composite_score >= before.composite_score);
            prop_assert!(after.risk_level >= before.risk_level);
            prop_assert!(after.recommendation >= before.recommendation);
        }

        #[test]
        fn test_composite_stays_in_unit_range(
            facts in claim_facts_strategy(),
            ml in unit_decimal_strategy(),
            graph in unit_decimal_strategy(),
            images in 0u32..4,
        ) {
            let summary = ClaimDamageSummaryBuilder::new().with_images(images).build();
            let assessment = engine()
                .assess(&facts, &summary, &FraudSignal::new(ml, graph, Decimal::ZERO))
                .unwrap();

            prop_assert!(assessment.composite_score.value() >= Decimal::ZERO);
            prop_assert!(assessment.composite_score.value() <= Decimal::ONE);
            prop_assert!(assessment.composite_score >= assessment.base_score);
            prop_assert_eq!(assessment.escalated, assessment.detected_flag_count > 0);
        }

        #[test]
        fn test_recommendation_monotone_in_flag_count(
            score in unit_decimal_strategy(),
            flags in 0usize..4,
        ) {
            let policy = FraudEngineConfig::default().decision;
            let score = core_kernel::Score::clamped(score);
            prop_assert!(policy.recommend(score, flags + 1) >= policy.recommend(score, flags));
        }
    }
}
