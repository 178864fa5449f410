//! Damage severity levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered damage severity, `Minor < Moderate < Major < TotalLoss`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    /// Cosmetic, vehicle fully functional
    Minor,
    /// Functional damage, repairable
    Moderate,
    /// Significant damage, may not be safe to drive
    Major,
    /// Not economically repairable
    TotalLoss,
}

/// Error returned when a severity label cannot be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unrecognized severity level: {0}")]
pub struct ParseSeverityError(pub String);

impl SeverityLevel {
    /// All levels in ascending order
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Minor,
        SeverityLevel::Moderate,
        SeverityLevel::Major,
        SeverityLevel::TotalLoss,
    ];

    /// Snake-case label as used in reference data
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Minor => "minor",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Major => "major",
            SeverityLevel::TotalLoss => "total_loss",
        }
    }

    /// Returns true for major damage and total losses
    pub fn is_high(&self) -> bool {
        *self >= SeverityLevel::Major
    }
}

impl FromStr for SeverityLevel {
    type Err = ParseSeverityError;

    /// Accepts any casing and `_`, `-` or space as separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect();

        match normalized.as_str() {
            "minor" => Ok(SeverityLevel::Minor),
            "moderate" => Ok(SeverityLevel::Moderate),
            "major" => Ok(SeverityLevel::Major),
            "total_loss" | "totalloss" => Ok(SeverityLevel::TotalLoss),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
