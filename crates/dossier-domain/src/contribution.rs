//! Source contributions - one source's data point within a fused result

use crate::record::FlatRecord;
use crate::tier::QualityTier;
use serde::{Deserialize, Serialize};

/// A single data point contributed by one source
///
/// Contributions are immutable once created; the correlator clones them into
/// findings and conflicts rather than mutating them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    /// Identifier of the contributing source
    pub source_name: String,

    /// The contributed data as a flat scalar map
    pub data: FlatRecord,

    /// Trust tier of the contributing source
    pub quality_tier: QualityTier,

    /// When the data was retrieved (milliseconds since Unix epoch)
    pub retrieved_at: u64,

    /// URL the data was retrieved from, when the source reports one
    pub source_url: Option<String>,

    /// Per-item confidence reported by the source, in [0, 1]
    pub confidence: Option<f64>,
}

impl SourceContribution {
    /// Create a new contribution
    pub fn new(
        source_name: impl Into<String>,
        data: FlatRecord,
        quality_tier: QualityTier,
        retrieved_at: u64,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            data,
            quality_tier,
            retrieved_at,
            source_url: None,
            confidence: None,
        }
    }

    /// Attach the retrieval URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Attach a per-item confidence value
    ///
    /// # Panics
    /// Panics if `confidence` is outside [0, 1]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&confidence),
            "Per-item confidence must be in [0, 1]"
        );
        self.confidence = Some(confidence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Scalar;

    #[test]
    fn test_contribution_builders() {
        let mut data = FlatRecord::new();
        data.insert("name", Scalar::Str("Aurora".to_string()));

        let contribution =
            SourceContribution::new("vessel-registry", data, QualityTier::High, 1_700_000_000_000)
                .with_source_url("https://registry.example/v/9321483")
                .with_confidence(0.9);

        assert_eq!(contribution.source_name, "vessel-registry");
        assert_eq!(contribution.quality_tier, QualityTier::High);
        assert_eq!(
            contribution.source_url.as_deref(),
            Some("https://registry.example/v/9321483")
        );
        assert_eq!(contribution.confidence, Some(0.9));
    }

    #[test]
    #[should_panic]
    fn test_invalid_confidence_rejected() {
        SourceContribution::new(
            "vessel-registry",
            FlatRecord::new(),
            QualityTier::High,
            1_700_000_000_000,
        )
        .with_confidence(1.5);
    }
}
