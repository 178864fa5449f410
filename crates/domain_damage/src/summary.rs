//! Per-claim damage summary

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::CostRange;
use domain_repair::{DamageTypeKey, SeverityLevel};

use crate::descriptor::SeverityScore;

/// Share of repair cost attributed to parts and materials
pub const PARTS_SHARE: Decimal = dec!(0.70);
/// Share of repair cost attributed to labor
pub const LABOR_SHARE: Decimal = dec!(0.25);
/// Share of repair cost attributed to everything else
pub const OTHER_SHARE: Decimal = dec!(0.05);

/// Damage findings merged across all analyzed images of a claim
///
/// A summary with `analyzed_count == 0` is a *no-assessment* summary: its
/// severity fields are absent and its cost is zero because nothing was
/// assessed, not because the damage is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDamageSummary {
    pub damage_types: BTreeSet<DamageTypeKey>,
    pub affected_areas: BTreeSet<String>,
    pub max_severity: Option<SeverityLevel>,
    pub max_severity_score: Option<SeverityScore>,
    /// Elementwise sum of per-image cost ranges
    pub total_cost: CostRange,
    /// Images attached to the claim, including failed analyses
    pub image_count: u32,
    /// Images with a damage descriptor
    pub analyzed_count: u32,
    /// Images whose cost came from the repair knowledge base
    pub knowledge_base_costed: u32,
    pub notes: Vec<String>,
}

/// Repair cost split into parts, labor, and other charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub parts: CostRange,
    pub labor: CostRange,
    pub other: CostRange,
}

impl ClaimDamageSummary {
    /// Summary for a claim where no image could be assessed
    pub fn no_assessment(image_count: u32) -> Self {
        Self {
            damage_types: BTreeSet::new(),
            affected_areas: BTreeSet::new(),
            max_severity: None,
            max_severity_score: None,
            total_cost: CostRange::zero(),
            image_count,
            analyzed_count: 0,
            knowledge_base_costed: 0,
            notes: Vec::new(),
        }
    }

    /// Returns true if at least one image produced a descriptor
    pub fn is_assessed(&self) -> bool {
        self.analyzed_count > 0
    }

    /// Number of attached images without a descriptor
    pub fn failed_count(&self) -> u32 {
        self.image_count.saturating_sub(self.analyzed_count)
    }

    /// Returns true if every attached image was analyzed
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }

    /// Fraction of attached images that were analyzed, `None` without images
    pub fn analysis_coverage(&self) -> Option<Decimal> {
        if self.image_count == 0 {
            return None;
        }
        Some(Decimal::from(self.analyzed_count) / Decimal::from(self.image_count))
    }

    /// Splits the total cost into parts (70%), labor (25%), and other (5%)
    pub fn cost_breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            parts: self.total_cost.scale(PARTS_SHARE),
            labor: self.total_cost.scale(LABOR_SHARE),
            other: self.total_cost.scale(OTHER_SHARE),
        }
    }
}
