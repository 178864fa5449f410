//! Claim Evaluation Engine
//!
//! Composition root that wires the repair knowledge base, damage aggregation,
//! and fraud risk engine into one evaluation per claim.
//!
//! # Usage
//!
//! ```no_run
//! use claims_engine::{ClaimEvaluator, EngineConfig};
//!
//! let config = EngineConfig::load(None)?;
//! claims_engine::telemetry::init_from_config(&config);
//! let _evaluator = ClaimEvaluator::from_config(&config)?;
//! # Ok::<(), claims_engine::EngineError>(())
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::EngineError;
pub use evaluator::{ClaimEvaluation, ClaimEvaluator, ClaimSubmission};
pub use telemetry::{init_from_config, init_json_tracing, init_tracing};
