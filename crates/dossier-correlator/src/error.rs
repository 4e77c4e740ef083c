//! Per-source failure reasons
//!
//! A failed source is an absent result, not an exception: each concurrent
//! task resolves to `Result<SourceQueryResult, SourceFailure>` and the merge
//! step pattern-matches, so no failure can propagate out of `aggregate`.

use dossier_domain::traits::{AdapterError, QueryStatus};
use thiserror::Error;

/// Why one source produced no usable result in an aggregation run
#[derive(Debug, Error)]
pub enum SourceFailure {
    /// The adapter itself failed (transport, timeout, malformed response)
    #[error("adapter failure: {0}")]
    Adapter(#[from] AdapterError),

    /// The adapter answered with a non-success status
    #[error("source returned {} status", .0.as_str())]
    NonSuccess(QueryStatus),

    /// The spawned task was cancelled or panicked
    #[error("source task aborted: {0}")]
    TaskAborted(String),

    /// No adapter is registered under the requested name
    #[error("unknown source: {0}")]
    UnknownSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let failure = SourceFailure::NonSuccess(QueryStatus::RateLimited);
        assert_eq!(failure.to_string(), "source returned rate_limited status");

        let failure = SourceFailure::UnknownSource("ghost".to_string());
        assert_eq!(failure.to_string(), "unknown source: ghost");
    }
}
