//! Repair cost reference catalog
//!
//! The catalog maps `(DamageTypeKey, SeverityLevel)` to cost and repair-time
//! rows and holds the historical repair scenarios used for corroboration.
//! Catalogs are described in JSON and validated once at load time; after
//! that they are immutable and can be shared freely between threads.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": "2024.1",
//!   "damage_types": [
//!     {
//!       "key": "dent",
//!       "description": "Dent repair or panel replacement",
//!       "common_parts": ["panel", "door"],
//!       "rows": {
//!         "moderate": { "cost": { "min": 500, "max": 1500 }, "average_repair_days": 2 }
//!       }
//!     }
//!   ],
//!   "scenarios": [
//!     {
//!       "name": "Parking lot door ding",
//!       "damage_types": ["dent"],
//!       "severity": "minor",
//!       "cost": { "min": 150, "max": 400 },
//!       "repair_days": 1,
//!       "notes": "PDR preferred"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use core_kernel::CostRange;

use crate::damage_type::DamageTypeKey;
use crate::error::CatalogError;
use crate::severity::SeverityLevel;

const BUILTIN_CATALOG: &str = include_str!("../data/repair_catalog.json");

/// Cost and duration for one damage type at one severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRow {
    pub cost: CostRange,
    pub average_repair_days: u32,
}

/// Reference data for a single damage type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageTypeProfile {
    pub key: DamageTypeKey,
    pub description: String,
    pub common_parts: BTreeSet<String>,
    rows: BTreeMap<SeverityLevel, CostRow>,
}

impl DamageTypeProfile {
    /// Returns the row for an exact severity, if the catalog defines one
    pub fn row(&self, severity: SeverityLevel) -> Option<&CostRow> {
        self.rows.get(&severity)
    }

    /// Severities with a cost row, in ascending order
    pub fn severities(&self) -> impl Iterator<Item = SeverityLevel> + '_ {
        self.rows.keys().copied()
    }
}

/// A resolved catalog row for a damage type and severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairCostEntry {
    pub damage_type: DamageTypeKey,
    /// Severity of the row actually used (after the moderate fallback)
    pub severity: SeverityLevel,
    pub cost: CostRange,
    pub average_repair_days: u32,
    pub description: String,
    pub common_parts: BTreeSet<String>,
}

/// A historical repair case used to corroborate an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairScenario {
    pub name: String,
    pub damage_types: BTreeSet<DamageTypeKey>,
    pub severity: SeverityLevel,
    pub cost: CostRange,
    pub repair_days: u32,
    pub notes: String,
}

/// Validated, immutable repair reference data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairCatalog {
    version: Option<String>,
    profiles: BTreeMap<DamageTypeKey, DamageTypeProfile>,
    scenarios: Vec<RepairScenario>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    version: Option<String>,
    damage_types: Vec<RawDamageType>,
    #[serde(default)]
    scenarios: Vec<RawScenario>,
}

#[derive(Deserialize)]
struct RawDamageType {
    key: String,
    description: String,
    #[serde(default)]
    common_parts: Vec<String>,
    rows: BTreeMap<String, CostRow>,
}

#[derive(Deserialize)]
struct RawScenario {
    name: String,
    damage_types: Vec<String>,
    severity: SeverityLevel,
    cost: CostRange,
    repair_days: u32,
    #[serde(default)]
    notes: String,
}

impl RepairCatalog {
    /// Loads the catalog shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::validate(raw)
    }

    /// Reads, parses, and validates a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn validate(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut profiles = BTreeMap::new();

        for raw_type in raw.damage_types {
            let key = DamageTypeKey::normalize(&raw_type.key);
            if raw_type.rows.is_empty() {
                return Err(CatalogError::EmptyCostTable(key.to_string()));
            }

            let mut rows = BTreeMap::new();
            for (label, row) in raw_type.rows {
                let severity: SeverityLevel = label.parse().map_err(|_| CatalogError::UnknownSeverity {
                    damage_type: key.to_string(),
                    label: label.clone(),
                })?;
                if row.average_repair_days == 0 {
                    return Err(CatalogError::NonPositiveRepairDays(format!("{key}/{severity}")));
                }
                rows.insert(severity, row);
            }

            if !rows.contains_key(&SeverityLevel::Moderate) {
                return Err(CatalogError::MissingDefaultSeverity(key.to_string()));
            }

            let profile = DamageTypeProfile {
                key: key.clone(),
                description: raw_type.description,
                common_parts: raw_type.common_parts.into_iter().collect(),
                rows,
            };
            if profiles.insert(key.clone(), profile).is_some() {
                return Err(CatalogError::DuplicateDamageType(key.to_string()));
            }
        }

        let mut scenarios = Vec::with_capacity(raw.scenarios.len());
        for raw_scenario in raw.scenarios {
            let damage_types: BTreeSet<DamageTypeKey> = raw_scenario
                .damage_types
                .iter()
                .map(|raw| DamageTypeKey::normalize(raw))
                .collect();
            if damage_types.is_empty() {
                return Err(CatalogError::EmptyScenario(raw_scenario.name));
            }
            if raw_scenario.repair_days == 0 {
                return Err(CatalogError::NonPositiveRepairDays(raw_scenario.name));
            }
            scenarios.push(RepairScenario {
                name: raw_scenario.name,
                damage_types,
                severity: raw_scenario.severity,
                cost: raw_scenario.cost,
                repair_days: raw_scenario.repair_days,
                notes: raw_scenario.notes,
            });
        }

        Ok(Self {
            version: raw.version,
            profiles,
            scenarios,
        })
    }

    /// Catalog version label, if the source declared one
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the profile for a normalized key
    pub fn profile(&self, key: &DamageTypeKey) -> Option<&DamageTypeProfile> {
        self.profiles.get(key)
    }

    /// Returns true if the catalog has cost data for the key
    pub fn contains(&self, key: &DamageTypeKey) -> bool {
        self.profiles.contains_key(key)
    }

    /// All damage types with reference data
    pub fn damage_types(&self) -> impl Iterator<Item = &DamageTypeKey> {
        self.profiles.keys()
    }

    /// Historical scenarios in declaration order
    pub fn scenarios(&self) -> &[RepairScenario] {
        &self.scenarios
    }

    /// Resolves the cost row for a damage type
    ///
    /// Uses the requested severity when the catalog has a row for it and the
    /// moderate row otherwise (including when no severity is given).
    pub fn entry(&self, key: &DamageTypeKey, severity: Option<SeverityLevel>) -> Option<RepairCostEntry> {
        let profile = self.profiles.get(key)?;
        let requested = severity.unwrap_or(SeverityLevel::Moderate);
        let (applied, row) = match profile.row(requested) {
            Some(row) => (requested, row),
            None => (SeverityLevel::Moderate, profile.row(SeverityLevel::Moderate)?),
        };

        Some(RepairCostEntry {
            damage_type: profile.key.clone(),
            severity: applied,
            cost: row.cost,
            average_repair_days: row.average_repair_days,
            description: profile.description.clone(),
            common_parts: profile.common_parts.clone(),
        })
    }
}
