//! Damage Aggregation Domain
//!
//! This crate merges the per-image findings of the external vision
//! collaborator into one damage summary per claim.
//!
//! # Flow
//!
//! ```text
//! image -> ImageAnalysis (Ok(descriptor) | Err(failure)) -> DamageAggregator -> ClaimDamageSummary
//! ```

pub mod descriptor;
pub mod summary;
pub mod aggregator;
pub mod error;

pub use descriptor::{AnalysisFailure, DamageDescriptor, FailureReason, ImageAnalysis, SeverityScore};
pub use summary::{ClaimDamageSummary, CostBreakdown};
pub use aggregator::DamageAggregator;
pub use error::DamageError;
