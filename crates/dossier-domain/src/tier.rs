//! Quality tier module - ordinal trust ranking of a source

use serde::{Deserialize, Serialize};

/// Trust tier of a data source
///
/// Ordinal ranking where a lower ordinal means a more trusted source, so the
/// best tier in a set is the minimum. Declaration order carries the ordering:
/// `High < Medium < Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Authoritative sources (official registries, sanctions lists)
    High,

    /// Reputable but secondary sources
    Medium,

    /// Unvetted or aggregated sources
    Low,
}

impl QualityTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }

    /// Parse a tier from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(QualityTier::High),
            "medium" => Some(QualityTier::Medium),
            "low" => Some(QualityTier::Low),
            _ => None,
        }
    }

    /// Whether this tier is strictly more trusted than another
    pub fn outranks(&self, other: QualityTier) -> bool {
        *self < other
    }
}

impl std::str::FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid quality tier: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(QualityTier::High < QualityTier::Medium);
        assert!(QualityTier::Medium < QualityTier::Low);
        assert_eq!(
            [QualityTier::Low, QualityTier::High, QualityTier::Medium]
                .iter()
                .min(),
            Some(&QualityTier::High)
        );
    }

    #[test]
    fn test_outranks_is_strict() {
        assert!(QualityTier::High.outranks(QualityTier::Low));
        assert!(!QualityTier::Medium.outranks(QualityTier::Medium));
        assert!(!QualityTier::Low.outranks(QualityTier::High));
    }

    #[test]
    fn test_parse_round_trip() {
        for tier in [QualityTier::High, QualityTier::Medium, QualityTier::Low] {
            assert_eq!(QualityTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(QualityTier::parse("HIGH"), Some(QualityTier::High));
        assert_eq!(QualityTier::parse("unknown"), None);
    }
}
