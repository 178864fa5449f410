//! Repair context returned by knowledge base lookups

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use core_kernel::{format_amount, CostRange};

use crate::damage_type::DamageTypeKey;
use crate::severity::SeverityLevel;

/// Number of scenarios included in a rendered knowledge brief
const BRIEF_SCENARIO_LIMIT: usize = 3;

/// Cost line for one input damage type that has reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageCostBreakdown {
    /// Label exactly as supplied by the caller
    pub label: String,
    pub damage_type: DamageTypeKey,
    pub severity: SeverityLevel,
    pub cost: CostRange,
    pub repair_days: u32,
    pub description: String,
    pub common_parts: BTreeSet<String>,
}

/// A historical scenario matched by damage-type overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMatch {
    pub name: String,
    pub severity: SeverityLevel,
    pub cost: CostRange,
    pub repair_days: u32,
    pub notes: String,
    /// Share of the scenario's damage types that were detected, in `(0, 1]`
    pub relevance: Decimal,
}

/// Follow-up actions suggested by the repair context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairRecommendation {
    StructuralInspection,
    RentalVehicle,
    TotalLossEvaluation,
    ComprehensiveAssessment,
}

impl RepairRecommendation {
    /// Adjuster-facing text
    pub fn message(&self) -> &'static str {
        match self {
            RepairRecommendation::StructuralInspection => {
                "High repair cost - recommend structural inspection"
            }
            RepairRecommendation::RentalVehicle => "Extended repair time - arrange rental vehicle",
            RepairRecommendation::TotalLossEvaluation => {
                "Severe damage - total loss evaluation recommended"
            }
            RepairRecommendation::ComprehensiveAssessment => {
                "Multiple damage areas - comprehensive damage assessment required"
            }
        }
    }
}

impl fmt::Display for RepairRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Cost and time context for a set of detected damage types
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepairContext {
    pub per_type: Vec<DamageCostBreakdown>,
    pub total_cost: CostRange,
    pub max_repair_days: u32,
    pub similar_scenarios: Vec<ScenarioMatch>,
    pub recommendations: Vec<RepairRecommendation>,
}

impl RepairContext {
    /// Returns true when at least one input type had reference data
    pub fn has_cost_data(&self) -> bool {
        !self.per_type.is_empty()
    }

    /// Best-matching scenario, if any
    pub fn best_scenario(&self) -> Option<&ScenarioMatch> {
        self.similar_scenarios.first()
    }

    /// Renders a plain-text knowledge brief
    ///
    /// The brief is handed to the external vision model as prompt context so
    /// its free-form cost estimate is anchored on historical repair data.
    pub fn render_brief(&self) -> String {
        let mut brief = String::from("REPAIR COST KNOWLEDGE BASE:\n");

        if !self.per_type.is_empty() {
            brief.push_str("\nDetected Damage Cost Estimates:\n");
            for line in &self.per_type {
                brief.push_str(&format!(
                    "- {} ({}): {} - {} ({} days)\n",
                    line.label,
                    line.severity,
                    format_amount(line.cost.min()),
                    format_amount(line.cost.max()),
                    line.repair_days
                ));
            }
        }

        if !self.similar_scenarios.is_empty() {
            brief.push_str("\nSimilar Past Claims:\n");
            for scenario in self.similar_scenarios.iter().take(BRIEF_SCENARIO_LIMIT) {
                brief.push_str(&format!(
                    "- {}: {} - {} ({} days)\n",
                    scenario.name,
                    format_amount(scenario.cost.min()),
                    format_amount(scenario.cost.max()),
                    scenario.repair_days
                ));
            }
        }

        if !self.recommendations.is_empty() {
            brief.push_str("\nRecommendations:\n");
            for recommendation in &self.recommendations {
                brief.push_str(&format!("- {recommendation}\n"));
            }
        }

        brief
    }
}

/// Confidence attached to a knowledge-base cost estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateConfidence {
    /// Corroborated by at least one historical scenario
    High,
    Medium,
}

/// Knowledge-base estimate used to reconcile model-produced costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairEstimate {
    pub cost: CostRange,
    pub repair_days: u32,
    pub confidence: EstimateConfidence,
    pub context: RepairContext,
}

impl RepairEstimate {
    /// Returns true if the estimate should override a model's own figure
    pub fn is_authoritative(&self) -> bool {
        self.confidence == EstimateConfidence::High && self.context.has_cost_data()
    }
}
