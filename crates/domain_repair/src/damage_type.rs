//! Normalized damage-type keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key used for the damage crushing a vehicle's structure
pub const CRUSHED: &str = "crushed";

/// Bucket for blank or whitespace-only damage labels
pub const UNKNOWN: &str = "unknown";

/// A normalized damage-type identifier
///
/// Keys are lowercase with every space and hyphen replaced by an underscore,
/// so `"Front-End Damage"` and `"front_end_damage"` compare equal.
/// Normalization is total and idempotent. Labels that are not part of the
/// reference catalog keep their normalized text; they simply have no cost data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DamageTypeKey(String);

impl DamageTypeKey {
    /// Normalizes a raw damage label into a key
    ///
    /// Surrounding whitespace is trimmed first, so `" dent"` maps to `dent`
    /// and a padded model label still finds its catalog row.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self(UNKNOWN.to_string());
        }

        let normalized = trimmed
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        Self(normalized)
    }

    /// Returns the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the blank-label bucket
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    /// Returns true for structural crush damage
    pub fn is_crushed(&self) -> bool {
        self.0 == CRUSHED
    }
}

impl From<&str> for DamageTypeKey {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for DamageTypeKey {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<DamageTypeKey> for String {
    fn from(key: DamageTypeKey) -> String {
        key.0
    }
}

impl AsRef<str> for DamageTypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DamageTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
