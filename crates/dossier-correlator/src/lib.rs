//! Dossier Correlator
//!
//! Fans one research query out to several independent data sources
//! concurrently, then fuses the heterogeneous, partially-overlapping results
//! into topical findings, field-level conflicts, and an overall confidence
//! number.
//!
//! One bad source never aborts the batch: each source's task resolves to a
//! result-or-failure value and the merge step pattern-matches on it, so
//! partial failure is a normal outcome communicated through
//! `AggregatedResult::sources_failed`, never an error to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod conflict;
pub mod correlator;
pub mod error;
pub mod extraction;

pub use config::CorrelatorConfig;
pub use correlator::Correlator;
pub use error::SourceFailure;
