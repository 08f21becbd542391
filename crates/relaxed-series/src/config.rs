//! Engine configuration.

/// Tuning knobs for a [`crate::SeriesArena`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest block length multiplied directly instead of through a transform.
    /// Below roughly 32 the transform overhead dominates.
    pub naive_threshold: usize,
    /// Number of leading coefficients inspected when `pow` or `sqrt` search
    /// for the valuation. A series with no nonzero coefficient in this window
    /// is treated as zero.
    pub valuation_scan_limit: usize,
    /// Node allocations between automatic collections of unreachable nodes.
    /// The interval never drops below the number of live nodes.
    pub collect_interval: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            naive_threshold: 32,
            valuation_scan_limit: 1 << 16,
            collect_interval: 1024,
        }
    }
}

impl EngineConfig {
    /// Sets the direct-multiplication threshold.
    #[must_use]
    pub fn with_naive_threshold(mut self, threshold: usize) -> Self {
        self.naive_threshold = threshold;
        self
    }

    /// Sets the valuation scan window.
    #[must_use]
    pub fn with_valuation_scan_limit(mut self, limit: usize) -> Self {
        self.valuation_scan_limit = limit;
        self
    }

    /// Sets the automatic collection interval.
    #[must_use]
    pub fn with_collect_interval(mut self, interval: usize) -> Self {
        self.collect_interval = interval;
        self
    }
}
