//! Indicator trait.
//!
//! Indicators are pure functions: bar history in, aligned series out. They
//! are precomputed once before signal evaluation; nothing is recomputed per
//! bar.

use crate::domain::Bar;

/// Trait for indicators.
///
/// `compute` returns one value per bar. Indices before the indicator has
/// enough history are `None`, never a sentinel number, so a comparison
/// against a warm-up value cannot accidentally succeed.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Index of the first defined value.
    fn lookback(&self) -> usize;

    /// Bars required before the indicator can feed signal evaluation.
    fn min_bars(&self) -> usize {
        self.lookback() + 1
    }

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec` of the same length as `bars`; the first `lookback()`
    /// entries are `None`.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}
