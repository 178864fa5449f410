//! Repair cost knowledge base
//!
//! Deterministic, side-effect-free retrieval of cost and repair-time context
//! for a set of detected damage types. The knowledge base wraps an immutable
//! [`RepairCatalog`]; construct it once and share it (e.g. behind an `Arc`)
//! across any number of threads.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use core_kernel::CostRange;

use crate::catalog::{RepairCatalog, RepairCostEntry};
use crate::context::{
    DamageCostBreakdown, EstimateConfidence, RepairContext, RepairEstimate, RepairRecommendation,
    ScenarioMatch,
};
use crate::damage_type::DamageTypeKey;
use crate::error::CatalogError;
use crate::severity::SeverityLevel;

/// Total maximum cost above which a structural inspection is recommended
pub const STRUCTURAL_INSPECTION_COST: Decimal = dec!(15000);

/// Repair duration above which a rental vehicle is recommended
pub const RENTAL_VEHICLE_DAYS: u32 = 7;

/// Number of distinct damage types that calls for a comprehensive assessment
pub const COMPREHENSIVE_ASSESSMENT_TYPES: usize = 3;

/// Lookup service over the repair catalog
#[derive(Debug, Clone)]
pub struct RepairCostKnowledgeBase {
    catalog: RepairCatalog,
}

impl RepairCostKnowledgeBase {
    /// Wraps an already validated catalog
    pub fn new(catalog: RepairCatalog) -> Self {
        Self { catalog }
    }

    /// Knowledge base over the built-in reference data
    pub fn builtin() -> Result<Self, CatalogError> {
        RepairCatalog::builtin().map(Self::new)
    }

    /// Knowledge base over a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        RepairCatalog::from_path(path).map(Self::new)
    }

    /// Returns the underlying catalog
    pub fn catalog(&self) -> &RepairCatalog {
        &self.catalog
    }

    /// Normalizes a raw damage label
    pub fn normalize(&self, raw: &str) -> DamageTypeKey {
        DamageTypeKey::normalize(raw)
    }

    /// Resolves a single catalog row, falling back to the moderate row
    pub fn entry(&self, raw: &str, severity: Option<SeverityLevel>) -> Option<RepairCostEntry> {
        self.catalog.entry(&DamageTypeKey::normalize(raw), severity)
    }

    /// Retrieves repair context for the detected damage types
    ///
    /// Every input label with reference data contributes its cost row to the
    /// totals (a label given twice is counted twice). Unrecognized labels
    /// contribute nothing. Empty input yields a zeroed context.
    pub fn lookup<S: AsRef<str>>(
        &self,
        damage_types: &[S],
        severity: Option<SeverityLevel>,
    ) -> RepairContext {
        let mut per_type = Vec::new();
        let mut total_cost = CostRange::zero();
        let mut max_repair_days = 0;
        let mut detected = BTreeSet::new();

        for raw in damage_types {
            let label = raw.as_ref();
            let key = DamageTypeKey::normalize(label);
            detected.insert(key.clone());

            let Some(entry) = self.catalog.entry(&key, severity) else {
                debug!(damage_type = %key, "No reference cost data for damage type");
                continue;
            };

            total_cost = total_cost + entry.cost;
            max_repair_days = max_repair_days.max(entry.average_repair_days);
            per_type.push(DamageCostBreakdown {
                label: label.to_string(),
                damage_type: entry.damage_type,
                severity: entry.severity,
                cost: entry.cost,
                repair_days: entry.average_repair_days,
                description: entry.description,
                common_parts: entry.common_parts,
            });
        }

        let similar_scenarios = self.match_scenarios(&detected);
        let recommendations = recommendations_for(total_cost, max_repair_days, &detected);

        debug!(
            inputs = damage_types.len(),
            matched = per_type.len(),
            scenarios = similar_scenarios.len(),
            total_min = %total_cost.min(),
            total_max = %total_cost.max(),
            "Repair context retrieved"
        );

        RepairContext {
            per_type,
            total_cost,
            max_repair_days,
            similar_scenarios,
            recommendations,
        }
    }

    /// Produces a cost estimate with a confidence rating
    ///
    /// Confidence is high when at least one historical scenario corroborates
    /// the detected damage types.
    pub fn estimate<S: AsRef<str>>(
        &self,
        damage_types: &[S],
        severity: Option<SeverityLevel>,
    ) -> RepairEstimate {
        let context = self.lookup(damage_types, severity);
        let confidence = if context.similar_scenarios.is_empty() {
            EstimateConfidence::Medium
        } else {
            EstimateConfidence::High
        };

        RepairEstimate {
            cost: context.total_cost,
            repair_days: context.max_repair_days,
            confidence,
            context,
        }
    }

    fn match_scenarios(&self, detected: &BTreeSet<DamageTypeKey>) -> Vec<ScenarioMatch> {
        let mut matches: Vec<ScenarioMatch> = self
            .catalog
            .scenarios()
            .iter()
            .filter_map(|scenario| {
                let overlap = scenario.damage_types.intersection(detected).count();
                if overlap == 0 {
                    return None;
                }
                let relevance = Decimal::from(overlap as u64)
                    / Decimal::from(scenario.damage_types.len() as u64);
                Some(ScenarioMatch {
                    name: scenario.name.clone(),
                    severity: scenario.severity,
                    cost: scenario.cost,
                    repair_days: scenario.repair_days,
                    notes: scenario.notes.clone(),
                    relevance,
                })
            })
            .collect();

        // Stable: ties keep catalog declaration order.
        matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        matches
    }
}

fn recommendations_for(
    total_cost: CostRange,
    max_repair_days: u32,
    detected: &BTreeSet<DamageTypeKey>,
) -> Vec<RepairRecommendation> {
    let mut recommendations = Vec::new();

    if total_cost.max() > STRUCTURAL_INSPECTION_COST {
        recommendations.push(RepairRecommendation::StructuralInspection);
    }
    if max_repair_days > RENTAL_VEHICLE_DAYS {
        recommendations.push(RepairRecommendation::RentalVehicle);
    }
    if detected.iter().any(DamageTypeKey::is_crushed) {
        recommendations.push(RepairRecommendation::TotalLossEvaluation);
    }
    if detected.len() >= COMPREHENSIVE_ASSESSMENT_TYPES {
        recommendations.push(RepairRecommendation::ComprehensiveAssessment);
    }

    recommendations
}
