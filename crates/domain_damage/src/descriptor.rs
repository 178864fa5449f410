//! Per-image damage findings
//!
//! A [`DamageDescriptor`] is produced by the external vision collaborator for
//! every image it analyzed successfully. Images it could not analyze are
//! reported as an [`AnalysisFailure`]; the pair forms [`ImageAnalysis`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use core_kernel::{CostRange, ImageId, Score};
use domain_repair::{DamageTypeKey, SeverityLevel};

use crate::error::DamageError;

/// Outcome of analyzing one image
pub type ImageAnalysis = Result<DamageDescriptor, AnalysisFailure>;

/// Severity on a 0-100 scale, where 100 is a total loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct SeverityScore(Decimal);

impl SeverityScore {
    pub const ZERO: SeverityScore = SeverityScore(Decimal::ZERO);

    /// Creates a validated severity score
    pub fn new(value: Decimal) -> Result<Self, DamageError> {
        if value < Decimal::ZERO || value > dec!(100) {
            return Err(DamageError::SeverityScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for SeverityScore {
    type Error = DamageError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        SeverityScore::new(value)
    }
}

impl From<SeverityScore> for Decimal {
    fn from(score: SeverityScore) -> Decimal {
        score.0
    }
}

impl fmt::Display for SeverityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Structured damage finding for a single image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDescriptor {
    #[serde(default)]
    pub image_id: Option<ImageId>,
    /// Detected damage types, in the order the model reported them
    pub damage_types: Vec<DamageTypeKey>,
    pub severity: SeverityLevel,
    pub severity_score: SeverityScore,
    #[serde(default)]
    pub affected_areas: BTreeSet<String>,
    /// The model's own repair cost estimate
    pub cost: CostRange,
    pub confidence: Score,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DamageDescriptor {
    /// Creates a descriptor with no affected areas or notes
    pub fn new<S: AsRef<str>>(
        damage_types: &[S],
        severity: SeverityLevel,
        severity_score: SeverityScore,
        cost: CostRange,
        confidence: Score,
    ) -> Self {
        Self {
            image_id: None,
            damage_types: damage_types
                .iter()
                .map(|raw| DamageTypeKey::normalize(raw.as_ref()))
                .collect(),
            severity,
            severity_score,
            affected_areas: BTreeSet::new(),
            cost,
            confidence,
            notes: None,
        }
    }

    /// Attaches the source image
    pub fn with_image_id(mut self, image_id: ImageId) -> Self {
        self.image_id = Some(image_id);
        self
    }

    /// Adds affected vehicle areas
    pub fn with_affected_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affected_areas.extend(areas.into_iter().map(Into::into));
        self
    }

    /// Adds a free-text observation
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns true for major damage and total losses
    pub fn is_high_severity(&self) -> bool {
        self.severity.is_high()
    }

    /// Midpoint of the model's cost estimate
    pub fn cost_midpoint(&self) -> Decimal {
        self.cost.midpoint()
    }
}

/// Why an image could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("analysis timed out")]
    Timeout,

    #[error("model response could not be parsed: {0}")]
    UnparseableResponse(String),

    #[error("model error: {0}")]
    ModelError(String),

    #[error("image file is missing")]
    MissingImage,
}

/// An image whose analysis failed upstream
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Image analysis failed: {reason}")]
pub struct AnalysisFailure {
    #[serde(default)]
    pub image_id: Option<ImageId>,
    pub reason: FailureReason,
}

impl AnalysisFailure {
    pub fn new(reason: FailureReason) -> Self {
        Self { image_id: None, reason }
    }

    pub fn for_image(image_id: ImageId, reason: FailureReason) -> Self {
        Self {
            image_id: Some(image_id),
            reason,
        }
    }
}
