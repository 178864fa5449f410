//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{CostRange, Score};
use domain_damage::{AnalysisFailure, DamageDescriptor, FailureReason, ImageAnalysis, SeverityScore};
use domain_fraud::{ClaimFacts, FraudSignal};
use domain_repair::SeverityLevel;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Damage labels drawn from the catalog plus a few unknown ones
pub const DAMAGE_LABELS: &[&str] = &[
    "front-end-damage",
    "rear_end_damage",
    "Side Impact Damage",
    "dent",
    "scratch",
    "broken_glass",
    "crushed",
    "water_damage",
    "tail-light",
];

/// Strategy for generating severity levels
pub fn severity_strategy() -> impl Strategy<Value = SeverityLevel> {
    prop_oneof![
        Just(SeverityLevel::Minor),
        Just(SeverityLevel::Moderate),
        Just(SeverityLevel::Major),
        Just(SeverityLevel::TotalLoss),
    ]
}

/// Strategy for generating unit-interval decimals with four decimal places
pub fn unit_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(i64::from(n), 4))
}

/// Strategy for generating valid scores
pub fn score_strategy() -> impl Strategy<Value = Score> {
    unit_decimal_strategy().prop_map(Score::clamped)
}

/// Strategy for generating 0-100 severity scores
pub fn severity_score_strategy() -> impl Strategy<Value = SeverityScore> {
    (0u32..=1000u32).prop_map(|n| SeverityScore::new(Decimal::new(i64::from(n), 1)).unwrap())
}

/// Strategy for generating whole-dollar cost ranges with `min <= max`
pub fn cost_range_strategy() -> impl Strategy<Value = CostRange> {
    (0u32..50_000u32, 0u32..50_000u32)
        .prop_map(|(low, spread)| CostRange::from_whole(low, low + spread).unwrap())
}

/// Strategy for generating damage label lists
pub fn damage_labels_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(proptest::sample::select(DAMAGE_LABELS), 0..4)
}

/// Strategy for generating damage descriptors
pub fn descriptor_strategy() -> impl Strategy<Value = DamageDescriptor> {
    (
        damage_labels_strategy(),
        severity_strategy(),
        severity_score_strategy(),
        cost_range_strategy(),
        score_strategy(),
    )
        .prop_map(|(labels, severity, severity_score, cost, confidence)| {
            DamageDescriptor::new(&labels[..], severity, severity_score, cost, confidence)
        })
}

/// Strategy for generating per-image analysis outcomes, mostly successful
pub fn image_analysis_strategy() -> impl Strategy<Value = ImageAnalysis> {
    prop_oneof![
        4 => descriptor_strategy().prop_map(ImageAnalysis::Ok),
        1 => Just(Err(AnalysisFailure::new(FailureReason::Timeout))),
    ]
}

/// Strategy for generating in-range fraud signals
pub fn fraud_signal_strategy() -> impl Strategy<Value = FraudSignal> {
    (unit_decimal_strategy(), unit_decimal_strategy(), unit_decimal_strategy())
        .prop_map(|(ml, graph, pattern)| FraudSignal::new(ml, graph, pattern))
}

/// Strategy for generating claim facts with non-negative amounts
pub fn claim_facts_strategy() -> impl Strategy<Value = ClaimFacts> {
    (0u32..100_000u32, 0u32..200_000u32)
        .prop_map(|(claimed, limit)| ClaimFacts::new(Decimal::from(claimed), Decimal::from(limit)))
}
