//! Findings - topical claims assembled from one or more source contributions

use crate::contribution::SourceContribution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Confidence boost applied to corroborated findings
pub const CORROBORATION_BOOST: f64 = 0.2;

/// Corroboration status of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorroborationStatus {
    /// Two or more distinct sources assert this topic
    Corroborated,

    /// Only a single source asserts this topic
    SingleSource,
}

/// One topical claim in an aggregated result
///
/// Status and confidence boost are derived from the contributing sources at
/// construction, so a finding can never claim corroboration it does not have:
/// `Corroborated` holds exactly when at least two distinct source names are
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Normalized topic key this finding groups under
    pub topic: String,

    /// Display content for the finding
    pub content: String,

    /// Contributions backing this finding (never empty)
    pub sources: Vec<SourceContribution>,

    /// Whether independent sources agree on this topic
    pub status: CorroborationStatus,

    /// Human-readable summary of the corroboration state
    pub corroboration_note: String,

    /// Confidence boost earned by corroboration (0.2 or 0.0)
    pub confidence_boost: f64,
}

impl Finding {
    /// Assemble a finding from its backing contributions
    ///
    /// # Panics
    /// Panics if `sources` is empty
    pub fn new(
        topic: impl Into<String>,
        content: impl Into<String>,
        sources: Vec<SourceContribution>,
    ) -> Self {
        assert!(!sources.is_empty(), "A finding requires at least one source");

        let distinct: BTreeSet<&str> = sources.iter().map(|s| s.source_name.as_str()).collect();

        let (status, confidence_boost, corroboration_note) = if distinct.len() >= 2 {
            let names: Vec<&str> = distinct.into_iter().collect();
            (
                CorroborationStatus::Corroborated,
                CORROBORATION_BOOST,
                format!(
                    "Corroborated by {} sources: {}",
                    names.len(),
                    names.join(", ")
                ),
            )
        } else {
            (
                CorroborationStatus::SingleSource,
                0.0,
                format!("Reported by {} only", sources[0].source_name),
            )
        };

        Self {
            topic: topic.into(),
            content: content.into(),
            sources,
            status,
            corroboration_note,
            confidence_boost,
        }
    }

    /// Number of distinct source names backing this finding
    pub fn distinct_source_count(&self) -> usize {
        self.sources
            .iter()
            .map(|s| s.source_name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether independent sources agree on this topic
    pub fn is_corroborated(&self) -> bool {
        self.status == CorroborationStatus::Corroborated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FlatRecord;
    use crate::tier::QualityTier;

    fn contribution(source: &str) -> SourceContribution {
        SourceContribution::new(source, FlatRecord::new(), QualityTier::Medium, 0)
    }

    #[test]
    fn test_corroborated_requires_distinct_sources() {
        let finding = Finding::new(
            "sanctions",
            "Listed on two registers",
            vec![contribution("sanctions-list"), contribution("news-feed")],
        );

        assert!(finding.is_corroborated());
        assert_eq!(finding.confidence_boost, CORROBORATION_BOOST);
        assert_eq!(finding.distinct_source_count(), 2);
    }

    #[test]
    fn test_note_sorts_source_names() {
        let finding = Finding::new(
            "sanctions",
            "Listed",
            vec![contribution("zeta-feed"), contribution("alpha-registry")],
        );

        assert_eq!(
            finding.corroboration_note,
            "Corroborated by 2 sources: alpha-registry, zeta-feed"
        );
    }

    #[test]
    fn test_same_source_twice_is_single_source() {
        let finding = Finding::new(
            "economy",
            "GDP shrank",
            vec![contribution("news-feed"), contribution("news-feed")],
        );

        assert_eq!(finding.status, CorroborationStatus::SingleSource);
        assert_eq!(finding.confidence_boost, 0.0);
        assert_eq!(finding.corroboration_note, "Reported by news-feed only");
    }

    #[test]
    #[should_panic]
    fn test_empty_sources_rejected() {
        Finding::new("topic", "content", vec![]);
    }
}
