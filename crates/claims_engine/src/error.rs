//! Engine error handling

use thiserror::Error;

use domain_fraud::FraudError;
use domain_repair::CatalogError;

/// Errors raised while building or running the claim evaluator
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Repair catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Fraud engine error: {0}")]
    Fraud(#[from] FraudError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
