//! Engine configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use domain_fraud::FraudEngineConfig;

/// Prefix of environment variables read by [`EngineConfig::from_env`]
pub const ENV_PREFIX: &str = "CLAIMS_ENGINE";

/// Engine configuration
///
/// Environment variables use the `CLAIMS_ENGINE_` prefix with `__` between
/// nested keys, e.g. `CLAIMS_ENGINE_FRAUD__ML_WEIGHT=0.7`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON objects
    pub json_logs: bool,
    /// Repair catalog to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Replace model cost estimates with corroborated catalog costs
    pub reconcile_costs: bool,
    /// Fraud engine tuning
    pub fraud: FraudEngineConfig,
    /// Worker threads for batch evaluation; rayon's global pool when unset
    pub batch_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            catalog_path: None,
            reconcile_costs: false,
            fraud: FraudEngineConfig::default(),
            batch_threads: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Loads configuration from a TOML or JSON file, with environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Reads `.env` if present, then loads from `path` or the environment
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
