//! Confidence computation module
//!
//! Implements the deterministic scoring pipeline that turns source-quality,
//! corroboration, conflict, and data-age signals into a bounded assessment.
//! Every applied adjustment is recorded in the assessment's key factors so
//! the computation can be audited after the fact.

use crate::confidence::ConfidenceAssessment;
use crate::tier::QualityTier;

/// Base percentage when the weakest source tier is high
pub const BASE_HIGH: f64 = 0.8;

/// Base percentage when the weakest source tier is medium
pub const BASE_MEDIUM: f64 = 0.6;

/// Base percentage when the weakest source tier is low
pub const BASE_LOW: f64 = 0.4;

/// Boost per corroborating source (capped at [`CORROBORATION_CAP`])
pub const CORROBORATION_STEP: f64 = 0.05;

/// Maximum total corroboration boost
pub const CORROBORATION_CAP: f64 = 0.15;

/// Penalty per conflicting source (capped at [`CONFLICT_CAP`])
pub const CONFLICT_STEP: f64 = 0.1;

/// Maximum total conflict penalty
pub const CONFLICT_CAP: f64 = 0.2;

/// Penalty per day of data age beyond the grace period
pub const AGE_STEP_PER_DAY: f64 = 0.02;

/// Maximum total age penalty
pub const AGE_CAP: f64 = 0.1;

/// Days of data age carrying no penalty
pub const AGE_GRACE_DAYS: f64 = 7.0;

/// Lower clamp of the final percentage
pub const PERCENTAGE_FLOOR: f64 = 0.05;

/// Upper clamp of the final percentage
pub const PERCENTAGE_CEILING: f64 = 0.98;

/// Compute a confidence assessment from source signals
///
/// The base percentage is chosen by the weakest (least trusted) tier
/// present. Adjustments are additive and individually capped, and the final
/// percentage is clamped to [0.05, 0.98].
///
/// Empty `quality_tiers` short-circuits to the floor percentage.
pub fn calculate_from_sources(
    quality_tiers: &[QualityTier],
    corroborating_count: usize,
    conflicting_count: usize,
    data_age_hours: f64,
) -> ConfidenceAssessment {
    let Some(weakest) = quality_tiers.iter().max() else {
        return ConfidenceAssessment::new(
            PERCENTAGE_FLOOR,
            "No sources available to assess",
            vec![format!("no sources: floor {:.2}", PERCENTAGE_FLOOR)],
        );
    };

    let base = match weakest {
        QualityTier::High => BASE_HIGH,
        QualityTier::Medium => BASE_MEDIUM,
        QualityTier::Low => BASE_LOW,
    };

    let mut key_factors = vec![format!(
        "base {:.2} from weakest source tier ({})",
        base,
        weakest.as_str()
    )];

    let corroboration_boost =
        (CORROBORATION_STEP * corroborating_count as f64).min(CORROBORATION_CAP);
    if corroboration_boost > 0.0 {
        key_factors.push(format!(
            "+{:.2} corroboration ({} corroborating sources)",
            corroboration_boost, corroborating_count
        ));
    }

    let conflict_penalty = (CONFLICT_STEP * conflicting_count as f64).min(CONFLICT_CAP);
    if conflict_penalty > 0.0 {
        key_factors.push(format!(
            "-{:.2} conflicts ({} conflicting sources)",
            conflict_penalty, conflicting_count
        ));
    }

    let age_days = data_age_hours / 24.0;
    let age_penalty = (AGE_STEP_PER_DAY * (age_days - AGE_GRACE_DAYS).max(0.0)).min(AGE_CAP);
    if age_penalty > 0.0 {
        key_factors.push(format!(
            "-{:.2} data age ({:.1} days old)",
            age_penalty, age_days
        ));
    }

    let percentage = (base + corroboration_boost - conflict_penalty - age_penalty)
        .clamp(PERCENTAGE_FLOOR, PERCENTAGE_CEILING);

    let reasoning = format!(
        "{} source(s), weakest tier {}; {} corroborating, {} conflicting",
        quality_tiers.len(),
        weakest.as_str(),
        corroborating_count,
        conflicting_count
    );

    ConfidenceAssessment::new(percentage, reasoning, key_factors)
}
