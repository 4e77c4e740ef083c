//! Entity matches - the outcome of resolving a free-text name

use serde::{Deserialize, Serialize};

/// The strategy tier that produced an entity match
///
/// Tiers are tried in declaration order, stopping at the first success.
/// Each carries a fixed default confidence; the fuzzy tier overrides it with
/// the actual similarity ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Case-folded exact registry lookup
    Exact,

    /// Match after full text normalization
    Normalized,

    /// Match delegated to the external lookup collaborator
    ExternalLookup,

    /// Best fuzzy-similarity match above the acceptance threshold
    Fuzzy,

    /// No tier produced a match
    Failed,
}

impl ResolutionTier {
    /// Default confidence for a match produced at this tier
    pub fn default_confidence(&self) -> f64 {
        match self {
            ResolutionTier::Exact => 1.0,
            ResolutionTier::Normalized => 0.95,
            ResolutionTier::ExternalLookup => 0.85,
            ResolutionTier::Fuzzy => 0.75,
            ResolutionTier::Failed => 0.0,
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionTier::Exact => "exact",
            ResolutionTier::Normalized => "normalized",
            ResolutionTier::ExternalLookup => "external_lookup",
            ResolutionTier::Fuzzy => "fuzzy",
            ResolutionTier::Failed => "failed",
        }
    }
}

/// Result of resolving a free-text name to a canonical identifier
///
/// Created fresh per resolution call; resolution failure is expressed as a
/// `Failed`-tier match carrying suggestions, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMatch {
    /// The tier that produced this match
    pub resolution_tier: ResolutionTier,

    /// Confidence in the match, in [0, 1]
    pub match_confidence: f64,

    /// Canonical identifier from the registry
    pub entity_id: Option<String>,

    /// Identifier reported by the external lookup collaborator
    pub external_id: Option<String>,

    /// The registry or lookup label that matched
    pub matched_label: Option<String>,

    /// The query as originally given
    pub original_query: String,

    /// Alternative spellings to try (populated only on failure)
    pub suggestions: Vec<String>,
}

impl EntityMatch {
    /// Create a match at the given tier
    ///
    /// # Panics
    /// Panics if `match_confidence` is outside [0, 1]
    pub fn new(
        resolution_tier: ResolutionTier,
        match_confidence: f64,
        original_query: impl Into<String>,
    ) -> Self {
        assert!(
            (0.0..=1.0).contains(&match_confidence),
            "Match confidence must be in [0, 1]"
        );

        Self {
            resolution_tier,
            match_confidence,
            entity_id: None,
            external_id: None,
            matched_label: None,
            original_query: original_query.into(),
            suggestions: Vec::new(),
        }
    }

    /// Create a failed match with suggestions
    pub fn failed(original_query: impl Into<String>, suggestions: Vec<String>) -> Self {
        let mut entity_match = Self::new(ResolutionTier::Failed, 0.0, original_query);
        entity_match.suggestions = suggestions;
        entity_match
    }

    /// Attach the canonical registry identifier and label
    pub fn with_entity(mut self, entity_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self.matched_label = Some(label.into());
        self
    }

    /// Attach the identifier reported by the external collaborator
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Attach the label reported by the external collaborator
    pub fn with_matched_label(mut self, label: impl Into<String>) -> Self {
        self.matched_label = Some(label.into());
        self
    }

    /// Whether any tier produced a match
    pub fn is_resolved(&self) -> bool {
        self.resolution_tier != ResolutionTier::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_default_confidences() {
        assert_eq!(ResolutionTier::Exact.default_confidence(), 1.0);
        assert_eq!(ResolutionTier::Normalized.default_confidence(), 0.95);
        assert_eq!(ResolutionTier::ExternalLookup.default_confidence(), 0.85);
        assert_eq!(ResolutionTier::Fuzzy.default_confidence(), 0.75);
        assert_eq!(ResolutionTier::Failed.default_confidence(), 0.0);
    }

    #[test]
    fn test_match_builders() {
        let entity_match = EntityMatch::new(ResolutionTier::Exact, 1.0, "vladimir putin")
            .with_entity("Q7747", "Vladimir Putin");

        assert!(entity_match.is_resolved());
        assert_eq!(entity_match.entity_id.as_deref(), Some("Q7747"));
        assert_eq!(entity_match.matched_label.as_deref(), Some("Vladimir Putin"));
        assert!(entity_match.suggestions.is_empty());
    }

    #[test]
    fn test_failed_match_carries_suggestions() {
        let entity_match = EntityMatch::failed(
            "Vladmir Puttin",
            vec!["Did you mean 'Vladimir Putin'?".to_string()],
        );

        assert!(!entity_match.is_resolved());
        assert_eq!(entity_match.match_confidence, 0.0);
        assert_eq!(entity_match.suggestions.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_invalid_confidence_rejected() {
        EntityMatch::new(ResolutionTier::Fuzzy, 1.3, "query");
    }
}
