//! Fraud Risk Domain
//!
//! This crate fuses model-derived fraud signals with claim facts and the
//! aggregated damage summary into a risk score, a risk tier, and a claim
//! recommendation.
//!
//! # Scoring
//!
//! ```text
//! base      = ml * 0.6 + graph * 0.4
//! composite = min(base + 0.15, 1)   if any discrepancy or evidence flag fired
//!           = base                  otherwise
//! ```

pub mod signal;
pub mod flags;
pub mod assessment;
pub mod config;
pub mod engine;
pub mod error;

pub use signal::{ClaimFacts, FraudSignal, SignalScores};
pub use flags::{DiscrepancyFlag, FlagKind, RiskFlag};
pub use assessment::{FraudAssessment, Recommendation, RecommendedAction, RiskLevel};
pub use config::{DecisionPolicy, FraudEngineConfig, RiskThresholds};
pub use engine::FraudRiskEngine;
pub use error::FraudError;
