//! Aggregated results - the top-level output of a fusion run

use crate::conflict::Conflict;
use crate::contribution::SourceContribution;
use crate::finding::Finding;
use serde::{Deserialize, Serialize};

/// The fused answer to one research query
///
/// Created once per aggregation call and never mutated afterwards. Partial
/// source failure is communicated through `sources_failed` rather than an
/// error: the caller always receives a complete result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// The research query this result answers
    pub query: String,

    /// Topical findings, sorted by topic
    pub findings: Vec<Finding>,

    /// Field-level disagreements, in discovery order
    pub conflicts: Vec<Conflict>,

    /// Sources that returned data
    pub sources_queried: Vec<String>,

    /// Sources that were requested but unreachable or unknown
    pub sources_failed: Vec<String>,

    /// Overall confidence in [0, 1]
    pub overall_confidence: f64,

    /// One summary contribution per succeeded source, for citation
    pub source_attributions: Vec<SourceContribution>,
}

impl AggregatedResult {
    /// Number of corroborated findings
    pub fn corroborated_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_corroborated()).count()
    }

    /// Whether any requested source failed to answer
    pub fn is_partial(&self) -> bool {
        !self.sources_failed.is_empty()
    }
}
