//! Correlator configuration
//!
//! Explicit values passed at construction; there is no global settings
//! object.

use dossier_domain::QualityTier;

/// Configuration for the correlator
#[derive(Debug, Clone)]
pub struct CorrelatorConfig {
    /// Name of the news-feed source
    ///
    /// Records from this source each get a unique topic (derived from the
    /// article URL) instead of a mergeable one: every article is its own
    /// finding rather than something to corroborate across sources.
    pub news_source_name: String,

    /// Quality tier assumed for a source whose result carries no metadata
    pub default_quality_tier: QualityTier,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            news_source_name: "news-feed".to_string(),
            default_quality_tier: QualityTier::Medium,
        }
    }
}
