//! The correlator - concurrent multi-source query and fusion
//!
//! One task per selected source, joined in input order once all have
//! completed; the result set is then merged sequentially (no shared mutable
//! map between tasks). The correlator imposes no overall deadline and never
//! cancels in-flight siblings: each adapter carries its own timeout policy,
//! and a slow source is indistinguishable from a failed one.

use crate::config::CorrelatorConfig;
use crate::conflict::detect_conflicts;
use crate::error::SourceFailure;
use crate::extraction::{article_topic, extract_content, extract_topic, normalize_topic};
use dossier_domain::traits::{QueryParams, RelevanceEngine, SourceAdapter, SourceQueryResult};
use dossier_domain::{
    AggregatedResult, Finding, FlatRecord, QualityTier, Scalar, SourceContribution,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Starting point of the aggregate confidence score
pub const AGGREGATE_BASE: f64 = 0.5;

/// Per-corroboration boost and per-conflict penalty step
pub const AGGREGATE_STEP: f64 = 0.1;

/// Cap on the total corroboration boost and on the total conflict penalty
pub const AGGREGATE_CAP: f64 = 0.3;

/// Penalty when no finding is corroborated
pub const SINGLE_SOURCE_PENALTY: f64 = 0.05;

/// Confidence reported when aggregation produced no findings at all
pub const NO_FINDINGS_CONFIDENCE: f64 = 0.2;

/// Outcome of querying one source, carried from join to merge
struct SourceOutcome {
    name: String,
    base_tier: QualityTier,
    result: Result<SourceQueryResult, SourceFailure>,
}

/// Fuses concurrent multi-source query results into one assessment
pub struct Correlator {
    adapters: HashMap<String, Arc<dyn SourceAdapter>>,
    relevance: Arc<dyn RelevanceEngine>,
    config: CorrelatorConfig,
}

impl Correlator {
    /// Create a correlator with no registered sources
    pub fn new(relevance: Arc<dyn RelevanceEngine>, config: CorrelatorConfig) -> Self {
        Self {
            adapters: HashMap::new(),
            relevance,
            config,
        }
    }

    /// Register a source adapter under its own name
    ///
    /// A later registration with the same name replaces the earlier one.
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters
            .insert(adapter.source_name().to_string(), adapter);
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.adapters.len()
    }

    /// Answer a research query by fusing every selected source
    ///
    /// When `sources` is omitted the relevance engine picks them: its
    /// high-relevance subset, or every available source if nothing ranked
    /// highly. Per-source failure is recorded in `sources_failed`; this
    /// method itself never fails.
    pub async fn aggregate(&self, query: &str, sources: Option<&[String]>) -> AggregatedResult {
        let selected: Vec<String> = match sources {
            Some(names) => names.to_vec(),
            None => self.relevance.analyze(query).selected_sources().to_vec(),
        };
        debug!(query, sources = selected.len(), "starting aggregation");

        let outcomes = self.query_all(query, &selected).await;

        let mut sources_queried = Vec::new();
        let mut sources_failed = Vec::new();
        let mut succeeded = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(result) => {
                    sources_queried.push(outcome.name.clone());
                    succeeded.push((outcome.name, outcome.base_tier, result));
                }
                Err(failure) => {
                    warn!(source = %outcome.name, %failure, "source produced no result");
                    sources_failed.push(outcome.name);
                }
            }
        }

        // Extraction: reduce every record to a (topic, content) pair and a
        // contribution, grouping by normalized topic. BTreeMap keeps finding
        // order deterministic (sorted by topic).
        let mut groups: BTreeMap<String, Vec<(String, SourceContribution)>> = BTreeMap::new();
        let mut per_source: Vec<(String, Vec<SourceContribution>)> = Vec::new();
        let mut source_attributions = Vec::new();

        for (name, base_tier, result) in &succeeded {
            let meta = result
                .sources
                .iter()
                .find(|m| &m.source_name == name)
                .or_else(|| result.sources.first());
            let tier = meta.map(|m| m.quality_tier).unwrap_or(*base_tier);
            let retrieved_at = meta.map(|m| m.retrieved_at).unwrap_or(0);

            let mut contributions = Vec::with_capacity(result.results.len());
            for record in &result.results {
                let mut contribution =
                    SourceContribution::new(name.clone(), record.clone(), tier, retrieved_at);
                if let Some(url) = meta.and_then(|m| m.source_url.clone()) {
                    contribution = contribution.with_source_url(url);
                }
                if let Some(confidence) = meta.and_then(|m| m.confidence) {
                    contribution = contribution.with_confidence(confidence);
                }

                // Every news article is its own finding; other sources get
                // mergeable topics.
                let topic = if *name == self.config.news_source_name {
                    article_topic(record)
                } else {
                    extract_topic(record, name)
                };
                let content = extract_content(record);

                groups
                    .entry(normalize_topic(&topic))
                    .or_default()
                    .push((content, contribution.clone()));
                contributions.push(contribution);
            }

            let mut attribution_data = FlatRecord::new();
            attribution_data.insert("result_count", Scalar::Num(result.results.len() as f64));
            source_attributions.push(SourceContribution::new(
                name.clone(),
                attribution_data,
                tier,
                retrieved_at,
            ));

            per_source.push((name.clone(), contributions));
        }

        let mut findings = Vec::with_capacity(groups.len());
        for (topic, entries) in groups {
            // Content comes from the best-tier contribution; min_by_key
            // returns the first minimum, which breaks ties by input order.
            let content = entries
                .iter()
                .min_by_key(|(_, contribution)| contribution.quality_tier)
                .map(|(content, _)| content.clone())
                .unwrap_or_default();
            let sources: Vec<SourceContribution> =
                entries.into_iter().map(|(_, contribution)| contribution).collect();
            findings.push(Finding::new(topic, content, sources));
        }

        let conflicts = detect_conflicts(&per_source);
        let overall_confidence = overall_confidence(&findings, conflicts.len());

        debug!(
            findings = findings.len(),
            conflicts = conflicts.len(),
            failed = sources_failed.len(),
            overall_confidence,
            "aggregation complete"
        );

        AggregatedResult {
            query: query.to_string(),
            findings,
            conflicts,
            sources_queried,
            sources_failed,
            overall_confidence,
            source_attributions,
        }
    }

    /// Query every selected source concurrently, then join in input order
    async fn query_all(&self, query: &str, selected: &[String]) -> Vec<SourceOutcome> {
        let params = QueryParams::new(query);

        type QueryHandle = JoinHandle<Result<SourceQueryResult, SourceFailure>>;
        let mut spawned: Vec<(String, QualityTier, Option<QueryHandle>)> =
            Vec::with_capacity(selected.len());

        for name in selected {
            match self.adapters.get(name) {
                Some(adapter) => {
                    let adapter = Arc::clone(adapter);
                    let base_tier = adapter.base_quality_tier();
                    let params = params.clone();
                    let handle = tokio::spawn(async move {
                        let result = adapter.query(&params).await?;
                        if result.is_success() {
                            Ok(result)
                        } else {
                            Err(SourceFailure::NonSuccess(result.status))
                        }
                    });
                    spawned.push((name.clone(), base_tier, Some(handle)));
                }
                None => {
                    spawned.push((name.clone(), self.config.default_quality_tier, None));
                }
            }
        }

        // Join-then-merge: all tasks complete before any result is read, and
        // the outcome list is built sequentially in input order.
        let mut outcomes = Vec::with_capacity(spawned.len());
        for (name, base_tier, handle) in spawned {
            let result = match handle {
                None => Err(SourceFailure::UnknownSource(name.clone())),
                Some(handle) => match handle.await {
                    Ok(result) => result,
                    Err(join_error) => Err(SourceFailure::TaskAborted(join_error.to_string())),
                },
            };
            outcomes.push(SourceOutcome {
                name,
                base_tier,
                result,
            });
        }
        outcomes
    }
}

/// Aggregate confidence over the fused findings and conflicts
///
/// `0.5 + capped corroboration boost - capped conflict penalty`, minus a
/// small penalty when nothing corroborated, clamped to [0, 1]. Zero findings
/// skip the formula entirely and score a flat 0.2. This scale is simpler
/// than the source-quality calculator and serves a different caller.
fn overall_confidence(findings: &[Finding], conflict_count: usize) -> f64 {
    if findings.is_empty() {
        return NO_FINDINGS_CONFIDENCE;
    }

    let corroborated = findings.iter().filter(|f| f.is_corroborated()).count();
    let boost = (AGGREGATE_STEP * corroborated as f64).min(AGGREGATE_CAP);
    let penalty = (AGGREGATE_STEP * conflict_count as f64).min(AGGREGATE_CAP);
    let single_source_penalty = if corroborated == 0 {
        SINGLE_SOURCE_PENALTY
    } else {
        0.0
    };

    (AGGREGATE_BASE + boost - penalty - single_source_penalty).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::QualityTier;

    fn finding(topic: &str, sources: &[&str]) -> Finding {
        let contributions = sources
            .iter()
            .map(|s| SourceContribution::new(*s, FlatRecord::new(), QualityTier::Medium, 0))
            .collect();
        Finding::new(topic, "content", contributions)
    }

    #[test]
    fn test_no_findings_scores_flat() {
        assert_eq!(overall_confidence(&[], 0), NO_FINDINGS_CONFIDENCE);
        // Conflicts cannot exist without findings, but the short-circuit
        // ignores the count either way
        assert_eq!(overall_confidence(&[], 3), NO_FINDINGS_CONFIDENCE);
    }

    #[test]
    fn test_all_single_source_is_penalized() {
        let findings = vec![finding("economy", &["news-feed"])];
        assert!((overall_confidence(&findings, 0) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_corroboration_raises_confidence() {
        let findings = vec![finding("sanctions", &["a", "b"])];
        assert!((overall_confidence(&findings, 0) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_boost_caps_at_three_corroborations() {
        let findings = vec![
            finding("t1", &["a", "b"]),
            finding("t2", &["a", "b"]),
            finding("t3", &["a", "b"]),
            finding("t4", &["a", "b"]),
            finding("t5", &["a", "b"]),
        ];
        assert!((overall_confidence(&findings, 0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_conflicts_lower_confidence() {
        let findings = vec![finding("sanctions", &["a", "b"])];
        assert!((overall_confidence(&findings, 1) - 0.5).abs() < 1e-9);
        // Penalty caps at 0.3
        assert!((overall_confidence(&findings, 10) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_stays_in_unit_interval() {
        let findings = vec![finding("t", &["only"])];
        let score = overall_confidence(&findings, 50);
        assert!((0.0..=1.0).contains(&score));
    }
}
