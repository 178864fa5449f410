//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::{CostRange, ImageId, Score};
use domain_damage::{ClaimDamageSummary, DamageDescriptor, SeverityScore};
use domain_fraud::FraudSignal;
use domain_repair::{DamageTypeKey, SeverityLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::CostFixtures;

/// Builder for constructing damage descriptors
pub struct DamageDescriptorBuilder {
    damage_types: Vec<String>,
    severity: SeverityLevel,
    severity_score: Decimal,
    cost: CostRange,
    confidence: Decimal,
    image_id: Option<ImageId>,
    affected_areas: Vec<String>,
    notes: Option<String>,
}

impl Default for DamageDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DamageDescriptorBuilder {
    /// Creates a new builder for a moderate front-end finding
    pub fn new() -> Self {
        Self {
            damage_types: vec!["front_end_damage".to_string()],
            severity: SeverityLevel::Moderate,
            severity_score: dec!(50),
            cost: CostFixtures::moderate_front_end(),
            confidence: dec!(0.9),
            image_id: None,
            affected_areas: Vec::new(),
            notes: None,
        }
    }

    /// Replaces the detected damage types
    pub fn with_damage_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.damage_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level
    pub fn with_severity(mut self, severity: SeverityLevel) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the 0-100 severity score
    pub fn with_severity_score(mut self, score: Decimal) -> Self {
        self.severity_score = score;
        self
    }

    /// Sets the model's cost estimate in whole dollars
    pub fn with_cost(mut self, min: u32, max: u32) -> Self {
        self.cost = CostRange::from_whole(min, max).unwrap();
        self
    }

    /// Sets the model's confidence
    pub fn with_confidence(mut self, confidence: Decimal) -> Self {
        self.confidence = confidence;
        self
    }

    /// Attaches a fresh image ID
    pub fn with_image(mut self) -> Self {
        self.image_id = Some(ImageId::new());
        self
    }

    /// Sets the affected areas
    pub fn with_affected_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affected_areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// Sets free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the descriptor
    pub fn build(self) -> DamageDescriptor {
        let mut descriptor = DamageDescriptor::new(
            &self.damage_types[..],
            self.severity,
            SeverityScore::new(self.severity_score).unwrap(),
            self.cost,
            Score::new(self.confidence).unwrap(),
        )
        .with_affected_areas(self.affected_areas);

        if let Some(image_id) = self.image_id {
            descriptor = descriptor.with_image_id(image_id);
        }
        if let Some(notes) = self.notes {
            descriptor = descriptor.with_notes(notes);
        }
        descriptor
    }
}

/// Builder for constructing damage summaries directly, bypassing aggregation
pub struct ClaimDamageSummaryBuilder {
    total_cost: CostRange,
    image_count: u32,
    analyzed_count: u32,
    max_severity: Option<SeverityLevel>,
    damage_types: Vec<String>,
}

impl Default for ClaimDamageSummaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDamageSummaryBuilder {
    /// Creates a builder for two analyzed images estimating $4,000–$9,000
    pub fn new() -> Self {
        Self {
            total_cost: CostFixtures::moderate_front_end(),
            image_count: 2,
            analyzed_count: 2,
            max_severity: Some(SeverityLevel::Moderate),
            damage_types: vec!["front_end_damage".to_string()],
        }
    }

    /// Sets the total cost in whole dollars
    pub fn with_total_cost(mut self, min: u32, max: u32) -> Self {
        self.total_cost = CostRange::from_whole(min, max).unwrap();
        self
    }

    /// Sets both attached and analyzed image counts
    pub fn with_images(mut self, count: u32) -> Self {
        self.image_count = count;
        self.analyzed_count = count;
        self
    }

    /// Marks every attached image as failed
    pub fn unassessed(mut self) -> Self {
        self.analyzed_count = 0;
        self.max_severity = None;
        self.damage_types.clear();
        self.total_cost = CostRange::zero();
        self
    }

    /// Builds the summary
    pub fn build(self) -> ClaimDamageSummary {
        let mut summary = ClaimDamageSummary::no_assessment(self.image_count);
        summary.analyzed_count = self.analyzed_count.min(self.image_count);
        summary.total_cost = self.total_cost;
        summary.max_severity = self.max_severity;
        summary.damage_types = self
            .damage_types
            .iter()
            .map(|raw| DamageTypeKey::normalize(raw))
            .collect();
        summary
    }
}

/// Builder for constructing fraud signals
pub struct FraudSignalBuilder {
    ml_model_score: Decimal,
    graph_network_score: Decimal,
    pattern_matching_score: Decimal,
    prior_flags: Vec<String>,
}

impl Default for FraudSignalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FraudSignalBuilder {
    /// Creates a builder with all scores at zero
    pub fn new() -> Self {
        Self {
            ml_model_score: Decimal::ZERO,
            graph_network_score: Decimal::ZERO,
            pattern_matching_score: Decimal::ZERO,
            prior_flags: Vec::new(),
        }
    }

    pub fn with_ml_score(mut self, score: Decimal) -> Self {
        self.ml_model_score = score;
        self
    }

    pub fn with_graph_score(mut self, score: Decimal) -> Self {
        self.graph_network_score = score;
        self
    }

    pub fn with_pattern_score(mut self, score: Decimal) -> Self {
        self.pattern_matching_score = score;
        self
    }

    /// Adds a historical red flag
    pub fn with_prior_flag(mut self, flag: impl Into<String>) -> Self {
        self.prior_flags.push(flag.into());
        self
    }

    /// Builds the signal
    pub fn build(self) -> FraudSignal {
        FraudSignal::new(
            self.ml_model_score,
            self.graph_network_score,
            self.pattern_matching_score,
        )
        .with_prior_flags(self.prior_flags)
    }
}
