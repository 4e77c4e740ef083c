//! Conflicts - field-level disagreements between two sources

use crate::contribution::SourceContribution;
use serde::{Deserialize, Serialize};

/// A disagreement between exactly two sources on one field of one entity
///
/// Conflicts are never suppressed or merged away; both values are retained
/// verbatim so a human analyst can weigh them. An authority is suggested only
/// when one source's quality tier strictly outranks the other's - it is never
/// guessed from anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// The field the sources disagree on
    pub topic: String,

    /// First source in the disagreement
    pub source_a: SourceContribution,

    /// Second source in the disagreement
    pub source_b: SourceContribution,

    /// First source's value, stringified (non-empty, differs from `value_b`)
    pub value_a: String,

    /// Second source's value, stringified (non-empty, differs from `value_a`)
    pub value_b: String,

    /// Source to prefer, when one tier strictly outranks the other
    pub suggested_authority: Option<String>,

    /// Human-readable resolution guidance
    pub resolution_note: String,
}

impl Conflict {
    /// Record a conflict between two sources over one field
    ///
    /// The suggested authority is derived from the quality tiers of the two
    /// contributions; a tie yields no suggestion.
    ///
    /// # Panics
    /// Panics if either value is empty or the values are equal
    pub fn new(
        topic: impl Into<String>,
        source_a: SourceContribution,
        value_a: impl Into<String>,
        source_b: SourceContribution,
        value_b: impl Into<String>,
    ) -> Self {
        let topic = topic.into();
        let value_a = value_a.into();
        let value_b = value_b.into();

        assert!(
            !value_a.is_empty() && !value_b.is_empty(),
            "Conflict values must be non-empty"
        );
        assert!(value_a != value_b, "Conflicting values must differ");

        let suggested_authority = if source_a.quality_tier.outranks(source_b.quality_tier) {
            Some(source_a.source_name.clone())
        } else if source_b.quality_tier.outranks(source_a.quality_tier) {
            Some(source_b.source_name.clone())
        } else {
            None
        };

        let resolution_note = match &suggested_authority {
            Some(name) => format!(
                "{} reports '{}', {} reports '{}'; prefer {} (higher quality tier)",
                source_a.source_name, value_a, source_b.source_name, value_b, name
            ),
            None => format!(
                "{} reports '{}', {} reports '{}'; equal quality tiers, both retained",
                source_a.source_name, value_a, source_b.source_name, value_b
            ),
        };

        Self {
            topic,
            source_a,
            source_b,
            value_a,
            value_b,
            suggested_authority,
            resolution_note,
        }
    }
}
