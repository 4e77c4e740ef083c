//! Conflict detection across source pairs
//!
//! Two records refer to the same entity when any identifier field is
//! present, non-empty, and equal (case-insensitively, trimmed) in both.
//! Matched entities are then compared on a fixed set of boolean/status
//! fields; every disagreement becomes a conflict, and none is suppressed.
//!
//! The scan is O(sources^2 x records^2). Fine at the expected scale of
//! single-digit sources with tens of records each; it would need revisiting
//! if record counts grew by orders of magnitude.

use dossier_domain::{Conflict, FlatRecord, SourceContribution};
use tracing::debug;

/// Identifier fields that establish "same entity" across two records
pub const IDENTIFIER_FIELDS: [&str; 7] =
    ["id", "entity_id", "imo", "mmsi", "icao24", "callsign", "name"];

/// Boolean/status fields compared once two records are matched
pub const STATUS_FIELDS: [&str; 7] = [
    "status",
    "sanctioned",
    "is_sanctioned",
    "pep",
    "is_pep",
    "active",
    "is_active",
];

/// Whether two records refer to the same entity
pub fn same_entity(a: &FlatRecord, b: &FlatRecord) -> bool {
    IDENTIFIER_FIELDS.iter().any(|field| {
        let (Some(va), Some(vb)) = (a.get(field), b.get(field)) else {
            return false;
        };
        if va.is_null() || vb.is_null() {
            return false;
        }

        let va = va.to_string().trim().to_lowercase();
        let vb = vb.to_string().trim().to_lowercase();
        !va.is_empty() && va == vb
    })
}

/// Detect conflicts among the contributions of successfully-queried sources
///
/// `per_source` holds one entry per succeeded source, in input order; each
/// entry's contributions are in record order. Conflicts are emitted in
/// discovery order (source pair order, then record order), which makes the
/// output deterministic for a given input.
pub fn detect_conflicts(per_source: &[(String, Vec<SourceContribution>)]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for i in 0..per_source.len() {
        for j in (i + 1)..per_source.len() {
            let (name_a, contributions_a) = &per_source[i];
            let (name_b, contributions_b) = &per_source[j];

            for contribution_a in contributions_a {
                for contribution_b in contributions_b {
                    if !same_entity(&contribution_a.data, &contribution_b.data) {
                        continue;
                    }

                    for field in STATUS_FIELDS {
                        let (Some(va), Some(vb)) = (
                            contribution_a.data.get(field),
                            contribution_b.data.get(field),
                        ) else {
                            continue;
                        };
                        if va.is_null() || vb.is_null() {
                            continue;
                        }

                        let va = va.to_string();
                        let vb = vb.to_string();
                        if va.is_empty() || vb.is_empty() || va == vb {
                            continue;
                        }

                        debug!(
                            field,
                            source_a = %name_a,
                            source_b = %name_b,
                            "conflicting values detected"
                        );
                        conflicts.push(Conflict::new(
                            field,
                            contribution_a.clone(),
                            va,
                            contribution_b.clone(),
                            vb,
                        ));
                    }
                }
            }
        }
    }

    conflicts
}
