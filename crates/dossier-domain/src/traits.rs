//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the fusion core and the
//! infrastructure it orchestrates. Adapter implementations (HTTP/WebSocket
//! clients, caches) live in other crates and are consumed only through these
//! contracts.

use crate::record::FlatRecord;
use crate::tier::QualityTier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised by a source adapter
///
/// Adapters own their timeout and backoff policy; by the time an error
/// reaches the correlator it is terminal for that source in this run.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Network-level failure reaching the source
    #[error("transport failure: {0}")]
    Transport(String),

    /// The adapter's own deadline elapsed
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The source answered with something the adapter could not normalize
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Outcome status of one adapter query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// The source answered with data
    Success,

    /// The source answered but had nothing relevant
    NoData,

    /// The source refused the request due to rate limiting
    RateLimited,
}

impl QueryStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Success => "success",
            QueryStatus::NoData => "no_data",
            QueryStatus::RateLimited => "rate_limited",
        }
    }
}

/// Query parameters passed to a source adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// The research query text
    pub query: String,
}

impl QueryParams {
    /// Create query parameters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Retrieval metadata for one batch of records from a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMeta {
    /// Identifier of the source
    pub source_name: String,

    /// Trust tier the source assigns this batch
    pub quality_tier: QualityTier,

    /// URL the batch was retrieved from
    pub source_url: Option<String>,

    /// Per-batch confidence reported by the source, in [0, 1]
    pub confidence: Option<f64>,

    /// When the batch was retrieved (milliseconds since Unix epoch)
    pub retrieved_at: u64,
}

/// The normalized result of one adapter query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQueryResult {
    /// Outcome status
    pub status: QueryStatus,

    /// Flat records the source reported
    pub results: Vec<FlatRecord>,

    /// Retrieval metadata, one entry per contributing batch
    pub sources: Vec<SourceMeta>,

    /// Error detail accompanying a non-success status
    pub error: Option<String>,
}

impl SourceQueryResult {
    /// Whether the query succeeded with data
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}

/// Uniform query contract each source satisfies
///
/// Implementations normalize one API's responses into flat records. Each
/// adapter carries its own timeout/backoff policy; the correlator treats a
/// slow adapter and a failing adapter identically.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Query the source
    async fn query(&self, params: &QueryParams) -> Result<SourceQueryResult, AdapterError>;

    /// Probe whether the source is currently reachable
    async fn health_check(&self) -> bool;

    /// Stable identifier of this source
    fn source_name(&self) -> &str;

    /// Trust tier of this source absent per-batch overrides
    fn base_quality_tier(&self) -> QualityTier;
}

/// Relevance analysis for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Every source the engine knows about
    pub available_sources: Vec<String>,

    /// The subset ranked highly relevant to the query
    pub high_relevance_sources: Vec<String>,
}

impl RelevanceReport {
    /// The sources to query: the high-relevance subset, or every available
    /// source when nothing ranked highly
    pub fn selected_sources(&self) -> &[String] {
        if self.high_relevance_sources.is_empty() {
            &self.available_sources
        } else {
            &self.high_relevance_sources
        }
    }
}

/// Ranks and filters which sources are worth querying
pub trait RelevanceEngine: Send + Sync {
    /// Analyze a query and rank the available sources
    fn analyze(&self, query: &str) -> RelevanceReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_sources_prefers_high_relevance() {
        let report = RelevanceReport {
            available_sources: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            high_relevance_sources: vec!["b".to_string()],
        };

        assert_eq!(report.selected_sources(), &["b".to_string()]);
    }

    #[test]
    fn test_selected_sources_falls_back_to_all() {
        let report = RelevanceReport {
            available_sources: vec!["a".to_string(), "b".to_string()],
            high_relevance_sources: vec![],
        };

        assert_eq!(report.selected_sources().len(), 2);
    }
}
