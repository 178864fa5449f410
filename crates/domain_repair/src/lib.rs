//! Repair Cost Knowledge Base
//!
//! This crate maps detected damage types and severities to reference repair
//! costs and durations, retrieves historically similar repair scenarios, and
//! derives follow-up recommendations.
//!
//! # Lookup
//!
//! ```text
//! raw labels -> normalize -> catalog rows (moderate fallback) -> totals
//!                         -> scenario overlap -> ranked matches
//!                         -> recommendation rules
//! ```

pub mod damage_type;
pub mod severity;
pub mod catalog;
pub mod context;
pub mod knowledge_base;
pub mod error;

pub use damage_type::DamageTypeKey;
pub use severity::{SeverityLevel, ParseSeverityError};
pub use catalog::{CostRow, DamageTypeProfile, RepairCatalog, RepairCostEntry, RepairScenario};
pub use context::{
    DamageCostBreakdown, EstimateConfidence, RepairContext, RepairEstimate, RepairRecommendation,
    ScenarioMatch,
};
pub use knowledge_base::RepairCostKnowledgeBase;
pub use error::CatalogError;
