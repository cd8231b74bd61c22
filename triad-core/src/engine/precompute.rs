//! Indicator precomputation.
//!
//! Every series is computed once, before the state machine reads any index.
//! The three indicator families are independent, so they run as a fork-join
//! on the rayon pool; `precompute_indicators` returns only after all of them
//! have finished.

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::BarSeries;
use crate::indicators::macd::{macd_of_series, MacdSeries};
use crate::indicators::rsi::rsi_of_series;
use crate::indicators::sma::sma_of_series;
use crate::indicators::IndicatorSet;

/// Build the full `IndicatorSet` for `series`.
///
/// The config is assumed valid (see `EngineConfig::validate`).
pub fn precompute_indicators(series: &BarSeries, config: &EngineConfig) -> IndicatorSet {
    let closes = series.closes();
    let sma = config.sma;
    let macd = config.macd;
    let rsi = config.rsi;

    let ((sma_short, sma_mid, sma_long), (MacdSeries { line, signal }, rsi_values)) = rayon::join(
        || {
            (
                sma_of_series(&closes, sma.short),
                sma_of_series(&closes, sma.mid),
                sma_of_series(&closes, sma.long),
            )
        },
        || {
            rayon::join(
                || macd_of_series(&closes, macd.fast, macd.slow, macd.signal),
                || rsi_of_series(&closes, rsi.period, rsi.method),
            )
        },
    );

    let set = IndicatorSet {
        sma_short,
        sma_mid,
        sma_long,
        macd: line,
        macd_signal: signal,
        rsi: rsi_values,
    };
    debug_assert!(set.is_aligned());
    debug_assert_eq!(set.len(), series.len());

    debug!(
        bars = series.len(),
        first_complete = ?set.first_complete_index(),
        "indicators precomputed"
    );
    set
}
