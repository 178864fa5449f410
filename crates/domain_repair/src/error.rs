//! Repair knowledge base errors

use thiserror::Error;

/// Errors raised while loading or validating a repair catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse repair catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read repair catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Damage type {0} has no moderate cost row")]
    MissingDefaultSeverity(String),

    #[error("Damage type {damage_type} has an unrecognized severity row: {label}")]
    UnknownSeverity { damage_type: String, label: String },

    #[error("Damage type {0} has no cost rows")]
    EmptyCostTable(String),

    #[error("Damage type {0} appears more than once after normalization")]
    DuplicateDamageType(String),

    #[error("Repair days must be positive for {0}")]
    NonPositiveRepairDays(String),

    #[error("Scenario {0} lists no damage types")]
    EmptyScenario(String),
}
