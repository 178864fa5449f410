//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common inputs of the claim decision engine.
//! These fixtures are designed to be consistent and predictable for unit tests.

use std::sync::Arc;

use core_kernel::{CostRange, Score};
use domain_damage::{AnalysisFailure, DamageDescriptor, FailureReason, SeverityScore};
use domain_fraud::{ClaimFacts, FraudSignal};
use domain_repair::{RepairCostKnowledgeBase, SeverityLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for cost range test data
pub struct CostFixtures;

impl CostFixtures {
    /// Catalog range for minor front-end damage
    pub fn front_end_minor() -> CostRange {
        CostRange::from_whole(1500, 3500).unwrap()
    }

    /// Model range for a minor scratch
    pub fn scratch_minor() -> CostRange {
        CostRange::from_whole(150, 500).unwrap()
    }

    /// Typical moderate front-end estimate
    pub fn moderate_front_end() -> CostRange {
        CostRange::from_whole(4000, 9000).unwrap()
    }
}

/// Fixture for damage descriptors
pub struct DescriptorFixtures;

impl DescriptorFixtures {
    /// Minor front-end scuff with a model estimate of $1,500–$3,500
    pub fn front_end_scuff() -> DamageDescriptor {
        DamageDescriptor::new(
            &["front-end-damage"],
            SeverityLevel::Minor,
            SeverityScore::new(dec!(25)).unwrap(),
            CostFixtures::front_end_minor(),
            Score::new(dec!(0.9)).unwrap(),
        )
        .with_affected_areas(["front"])
    }

    /// Minor door scratch with a model estimate of $150–$500
    pub fn door_scratch() -> DamageDescriptor {
        DamageDescriptor::new(
            &["scratch"],
            SeverityLevel::Minor,
            SeverityScore::new(dec!(10)).unwrap(),
            CostFixtures::scratch_minor(),
            Score::new(dec!(0.85)).unwrap(),
        )
        .with_affected_areas(["driver_door"])
    }

    /// Major side impact with structural damage
    pub fn severe_side_impact() -> DamageDescriptor {
        DamageDescriptor::new(
            &["side-impact-damage", "crushed", "broken_glass"],
            SeverityLevel::Major,
            SeverityScore::new(dec!(82)).unwrap(),
            CostFixtures::moderate_front_end(),
            Score::new(dec!(0.75)).unwrap(),
        )
        .with_affected_areas(["driver_side", "b_pillar"])
    }
}

/// Fixture for image analysis outcomes
pub struct AnalysisFixtures;

impl AnalysisFixtures {
    /// An analysis that timed out
    pub fn timeout() -> AnalysisFailure {
        AnalysisFailure::new(FailureReason::Timeout)
    }

    /// An analysis whose model output could not be parsed
    pub fn unparseable() -> AnalysisFailure {
        AnalysisFailure::new(FailureReason::UnparseableResponse("not json".to_string()))
    }
}

/// Fixture for fraud signals
pub struct SignalFixtures;

impl SignalFixtures {
    /// Low-risk model output
    pub fn clean() -> FraudSignal {
        FraudSignal::new(dec!(0.1), dec!(0.1), dec!(0.05))
    }

    /// Mid-range output, base score 0.42
    pub fn moderate() -> FraudSignal {
        FraudSignal::new(dec!(0.5), dec!(0.3), dec!(0.2))
    }

    /// High-risk output with historical red flags
    pub fn suspicious() -> FraudSignal {
        FraudSignal::new(dec!(0.9), dec!(0.85), dec!(0.7))
            .with_prior_flags(["frequent_claims", "suspicious_shop"])
    }
}

/// Fixture for claim and policy facts
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Large policy limit that never trips the coverage check
    pub const LARGE_COVERAGE_LIMIT: Decimal = dec!(1000000);

    pub fn claimed(amount: Decimal) -> ClaimFacts {
        ClaimFacts::new(amount, Self::LARGE_COVERAGE_LIMIT)
    }

    /// Claim of $9,800 against a $10,000 limit
    pub fn near_limit() -> ClaimFacts {
        ClaimFacts::new(dec!(9800), dec!(10000))
    }
}

/// Fixture for the repair cost knowledge base
pub struct KnowledgeBaseFixtures;

impl KnowledgeBaseFixtures {
    /// Knowledge base backed by the bundled catalog
    pub fn builtin() -> Arc<RepairCostKnowledgeBase> {
        Arc::new(RepairCostKnowledgeBase::builtin().unwrap())
    }
}
