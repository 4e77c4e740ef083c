//! Resolver configuration

/// Lowest acceptance threshold the fuzzy tier allows
pub const FUZZY_THRESHOLD_FLOOR: f64 = 0.7;

/// Highest acceptance threshold the fuzzy tier allows
pub const FUZZY_THRESHOLD_CEILING: f64 = 0.9;

/// Default fuzzy acceptance threshold
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Configuration for the entity resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum similarity ratio the fuzzy tier accepts
    ///
    /// Constrained to the [0.7, 0.9] band; values outside it are pulled to
    /// the nearest bound at construction.
    pub fuzzy_threshold: f64,
}

impl ResolverConfig {
    /// Create a configuration with the given fuzzy threshold
    pub fn new(fuzzy_threshold: f64) -> Self {
        Self {
            fuzzy_threshold: fuzzy_threshold.clamp(FUZZY_THRESHOLD_FLOOR, FUZZY_THRESHOLD_CEILING),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}
