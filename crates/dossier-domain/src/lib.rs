//! Dossier Domain Layer
//!
//! This crate contains the core value types and pure scoring logic for
//! Dossier's multi-source fusion pipeline. It defines the fundamental
//! concepts that the correlator and resolver crates build on.
//!
//! ## Key Concepts
//!
//! - **Flat record**: a field-name → scalar map, the unit of data exchanged
//!   across the source-adapter boundary (never nested)
//! - **Source contribution**: one source's data point with quality tier and
//!   retrieval metadata
//! - **Finding**: one topical claim, corroborated or single-source
//! - **Conflict**: a disagreement between exactly two sources on one field
//! - **Confidence assessment**: a 7-point ordinal level plus an auditable
//!   percentage, translated through fixed bands
//! - **Entity match**: the outcome of resolving a free-text name through a
//!   strict chain of resolution tiers
//!
//! ## Architecture
//!
//! - Value objects validate their invariants at construction
//! - Pure scoring functions only; no I/O
//! - Trait definitions for the external collaborators (source adapters,
//!   relevance engine); infrastructure implementations live elsewhere

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conflict;
pub mod confidence;
pub mod confidence_computation;
pub mod contribution;
pub mod entity;
pub mod finding;
pub mod record;
pub mod report;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use conflict::Conflict;
pub use confidence::{percentage_to_level, ConfidenceAssessment, ConfidenceLevel};
pub use contribution::SourceContribution;
pub use entity::{EntityMatch, ResolutionTier};
pub use finding::{CorroborationStatus, Finding};
pub use record::{FlatRecord, RecordError, Scalar};
pub use report::AggregatedResult;
pub use tier::QualityTier;
