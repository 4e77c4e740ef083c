//! The entity resolver - strict tier chain from exact lookup to fuzzy match

use crate::config::{ResolverConfig, FUZZY_THRESHOLD_CEILING, FUZZY_THRESHOLD_FLOOR};
use crate::normalize::normalize_name;
use crate::registry::{EntityRegistry, RegistryEntry};
use crate::similarity::similarity_ratio;
use dossier_domain::traits::{QueryParams, SourceAdapter};
use dossier_domain::{EntityMatch, ResolutionTier};
use std::sync::Arc;
use tracing::debug;

/// Lower bound of the near-miss similarity band that earns a suggestion
const SUGGESTION_FLOOR: f64 = 0.5;

/// Upper bound (exclusive) of the near-miss suggestion band, below the
/// fuzzy acceptance threshold band
const SUGGESTION_CEILING: f64 = 0.8;

/// Generic advice attached to every failed resolution
const SPELLING_ADVICE: &str = "No registry match; check the spelling or try the full legal name";

/// Resolves free-text names against the registry and an optional external
/// lookup collaborator
///
/// Tiers are tried in strict order (exact, normalized, external lookup,
/// fuzzy), stopping at the first success; a later tier is never invoked once
/// an earlier one has matched. Resolution itself never fails: the error
/// channel is a `Failed`-tier match carrying suggestions.
pub struct EntityResolver {
    registry: EntityRegistry,
    lookup: Option<Arc<dyn SourceAdapter>>,
    config: ResolverConfig,
}

impl EntityResolver {
    /// Create a resolver over a registry, with no external collaborator
    pub fn new(registry: EntityRegistry, config: ResolverConfig) -> Self {
        Self {
            registry,
            lookup: None,
            config,
        }
    }

    /// Attach the external lookup collaborator
    pub fn with_lookup(mut self, lookup: Arc<dyn SourceAdapter>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Resolve a free-text name to a canonical identifier
    ///
    /// Empty or whitespace-only input fails immediately without attempting
    /// any lookup.
    pub async fn resolve(&self, query: &str) -> EntityMatch {
        if query.trim().is_empty() {
            return EntityMatch::failed(query, vec![SPELLING_ADVICE.to_string()]);
        }

        if let Some(entry) = self.registry.exact(query) {
            debug!(query, entity_id = %entry.entity_id, "exact registry match");
            return EntityMatch::new(
                ResolutionTier::Exact,
                ResolutionTier::Exact.default_confidence(),
                query,
            )
            .with_entity(entry.entity_id.clone(), entry.label.clone());
        }

        if let Some(entry) = self.normalized_match(query) {
            debug!(query, entity_id = %entry.entity_id, "normalized registry match");
            return EntityMatch::new(
                ResolutionTier::Normalized,
                ResolutionTier::Normalized.default_confidence(),
                query,
            )
            .with_entity(entry.entity_id.clone(), entry.label.clone());
        }

        if let Some(entity_match) = self.external_lookup(query).await {
            return entity_match;
        }

        if let Some((ratio, entry)) = self.best_fuzzy_match(query) {
            if ratio >= self.config.fuzzy_threshold {
                debug!(query, ratio, label = %entry.label, "fuzzy match accepted");
                // Confidence is the similarity itself, held inside the band
                let confidence = ratio.clamp(FUZZY_THRESHOLD_FLOOR, FUZZY_THRESHOLD_CEILING);
                return EntityMatch::new(ResolutionTier::Fuzzy, confidence, query)
                    .with_entity(entry.entity_id.clone(), entry.label.clone());
            }
        }

        debug!(query, "all resolution tiers exhausted");
        EntityMatch::failed(query, self.suggestions(query))
    }

    /// Tier 2: full normalization of the query against every registry key
    fn normalized_match(&self, query: &str) -> Option<&RegistryEntry> {
        let normalized_query = normalize_name(query);
        self.registry
            .entries()
            .iter()
            .find(|entry| normalize_name(&entry.name) == normalized_query)
    }

    /// Tier 3: delegate to the external lookup collaborator, if present
    ///
    /// Any collaborator failure is demoted to "no match" so the chain
    /// continues; a broken collaborator must never abort resolution.
    async fn external_lookup(&self, query: &str) -> Option<EntityMatch> {
        let lookup = self.lookup.as_ref()?;

        let result = match lookup.query(&QueryParams::new(query)).await {
            Ok(result) => result,
            Err(error) => {
                debug!(query, %error, "external lookup failed, continuing");
                return None;
            }
        };
        if !result.is_success() {
            return None;
        }

        let first = result.results.first()?;
        let external_id = first.display_field("external_id")?;

        debug!(query, %external_id, "external lookup match");
        let mut entity_match = EntityMatch::new(
            ResolutionTier::ExternalLookup,
            ResolutionTier::ExternalLookup.default_confidence(),
            query,
        )
        .with_external_id(external_id);
        if let Some(label) = first.display_field("label") {
            entity_match = entity_match.with_matched_label(label);
        }
        Some(entity_match)
    }

    /// Tier 4 candidate: the best-similarity registry label
    ///
    /// Ties keep the earliest entry.
    fn best_fuzzy_match(&self, query: &str) -> Option<(f64, &RegistryEntry)> {
        let mut best: Option<(f64, &RegistryEntry)> = None;
        for entry in self.registry.entries() {
            let ratio = similarity_ratio(query, &entry.label);
            if best.map_or(true, |(best_ratio, _)| ratio > best_ratio) {
                best = Some((ratio, entry));
            }
        }
        best
    }

    /// Suggestions for a failed resolution: generic spelling advice plus
    /// near-miss labels in the [0.5, 0.8) similarity band
    fn suggestions(&self, query: &str) -> Vec<String> {
        let mut suggestions = vec![SPELLING_ADVICE.to_string()];
        for entry in self.registry.entries() {
            let ratio = similarity_ratio(query, &entry.label);
            if (SUGGESTION_FLOOR..SUGGESTION_CEILING).contains(&ratio) {
                suggestions.push(format!("Did you mean '{}'?", entry.label));
            }
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryEntry;

    fn resolver() -> EntityResolver {
        let registry = EntityRegistry::new(vec![
            RegistryEntry::new("Vladimir Putin", "Q7747", "Vladimir Putin"),
            RegistryEntry::new("Acme Shipping", "C-1042", "Acme Shipping Ltd"),
        ]);
        EntityResolver::new(registry, ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_exact_match() {
        let entity_match = resolver().resolve("vladimir putin").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Exact);
        assert_eq!(entity_match.match_confidence, 1.0);
        assert_eq!(entity_match.entity_id.as_deref(), Some("Q7747"));
    }

    #[tokio::test]
    async fn test_normalized_match() {
        let entity_match = resolver().resolve("  VLADIMIR   PUTIN ").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Normalized);
        assert_eq!(entity_match.match_confidence, 0.95);
    }

    #[tokio::test]
    async fn test_diacritics_resolve_at_normalized_tier() {
        let entity_match = resolver().resolve("Vladímir Pútin").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Normalized);
        assert_eq!(entity_match.entity_id.as_deref(), Some("Q7747"));
    }

    #[tokio::test]
    async fn test_fuzzy_match_confidence_is_the_ratio() {
        // One missing character: ratio 1 - 1/14, clamped into [0.7, 0.9]
        let entity_match = resolver().resolve("Vladmir Putin").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Fuzzy);
        assert!((0.7..=0.9).contains(&entity_match.match_confidence));
        assert_eq!(entity_match.entity_id.as_deref(), Some("Q7747"));
    }

    #[tokio::test]
    async fn test_failed_with_near_miss_suggestion() {
        // "vladimir p" is a prefix: ratio 1 - 4/14 ≈ 0.71, below the 0.8
        // acceptance threshold but inside the suggestion band
        let entity_match = resolver().resolve("vladimir p").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Failed);
        assert_eq!(entity_match.match_confidence, 0.0);
        assert!(entity_match
            .suggestions
            .iter()
            .any(|s| s.contains("Vladimir Putin")));
    }

    #[tokio::test]
    async fn test_failed_always_carries_generic_advice() {
        let entity_match = resolver().resolve("completely unrelated xyz").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Failed);
        assert_eq!(entity_match.suggestions[0], SPELLING_ADVICE);
    }

    #[tokio::test]
    async fn test_empty_query_fails_immediately() {
        let entity_match = resolver().resolve("   ").await;

        assert_eq!(entity_match.resolution_tier, ResolutionTier::Failed);
        assert_eq!(entity_match.match_confidence, 0.0);
    }
}
