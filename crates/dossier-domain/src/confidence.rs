//! Confidence levels - the 7-point ordinal scale and its percentage bands
//!
//! The scale follows intelligence-community estimative language: each level
//! owns a fixed percentage band, and a numeric score is always translated
//! through the same bands so wording and numbers cannot drift apart.

use serde::{Deserialize, Serialize};

/// Estimative confidence level
///
/// Ordinal scale from least to most likely. Each level owns a fixed band of
/// the [0, 1] range; see [`percentage_to_level`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Almost no chance (0-5%)
    Remote,

    /// Very unlikely (5-20%)
    VeryUnlikely,

    /// Unlikely (20-45%)
    Unlikely,

    /// Roughly even chance (45-55%)
    RoughlyEven,

    /// Likely (55-80%)
    Likely,

    /// Very likely (80-95%)
    VeryLikely,

    /// Almost certain (95-100%)
    AlmostCertain,
}

impl ConfidenceLevel {
    /// Get the level as an estimative phrase
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Remote => "remote",
            ConfidenceLevel::VeryUnlikely => "very unlikely",
            ConfidenceLevel::Unlikely => "unlikely",
            ConfidenceLevel::RoughlyEven => "roughly even chance",
            ConfidenceLevel::Likely => "likely",
            ConfidenceLevel::VeryLikely => "very likely",
            ConfidenceLevel::AlmostCertain => "almost certain",
        }
    }

    /// The percentage band this level owns, as [lower, upper)
    ///
    /// The top band is closed at 1.0.
    pub fn band(&self) -> (f64, f64) {
        match self {
            ConfidenceLevel::Remote => (0.0, 0.05),
            ConfidenceLevel::VeryUnlikely => (0.05, 0.20),
            ConfidenceLevel::Unlikely => (0.20, 0.45),
            ConfidenceLevel::RoughlyEven => (0.45, 0.55),
            ConfidenceLevel::Likely => (0.55, 0.80),
            ConfidenceLevel::VeryLikely => (0.80, 0.95),
            ConfidenceLevel::AlmostCertain => (0.95, 1.0),
        }
    }
}

/// Translate a percentage into its confidence level
///
/// Band lower bounds are inclusive. Out-of-range inputs clamp to the nearest
/// boundary band; this is a deliberate policy for scores arriving from
/// arithmetic elsewhere, not a validation gap.
pub fn percentage_to_level(percentage: f64) -> ConfidenceLevel {
    let p = percentage.clamp(0.0, 1.0);
    if p < 0.05 {
        ConfidenceLevel::Remote
    } else if p < 0.20 {
        ConfidenceLevel::VeryUnlikely
    } else if p < 0.45 {
        ConfidenceLevel::Unlikely
    } else if p < 0.55 {
        ConfidenceLevel::RoughlyEven
    } else if p < 0.80 {
        ConfidenceLevel::Likely
    } else if p < 0.95 {
        ConfidenceLevel::VeryLikely
    } else {
        ConfidenceLevel::AlmostCertain
    }
}

/// A confidence score with its level, rationale, and audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// Estimative level matching `percentage`
    pub level: ConfidenceLevel,

    /// Numeric confidence in [0, 1]
    pub percentage: f64,

    /// One-line rationale for the score
    pub reasoning: String,

    /// Ordered adjustment explanations, base value first
    pub key_factors: Vec<String>,
}

impl ConfidenceAssessment {
    /// Create an assessment; the level is derived from the percentage
    ///
    /// # Panics
    /// Panics if `percentage` is outside [0, 1]
    pub fn new(percentage: f64, reasoning: impl Into<String>, key_factors: Vec<String>) -> Self {
        assert!(
            (0.0..=1.0).contains(&percentage),
            "Confidence percentage must be in [0, 1]"
        );

        Self {
            level: percentage_to_level(percentage),
            percentage,
            reasoning: reasoning.into(),
            key_factors,
        }
    }
}
