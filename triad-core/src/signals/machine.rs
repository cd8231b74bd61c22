//! Per-bar signal evaluation.
//!
//! The machine holds configuration only. Each record is derived from the
//! indicator rows at `i-1` and `i`; nothing is carried from one bar to the
//! next, so evaluating a prefix of the set gives the same records as the
//! matching prefix of a full evaluation.

use crate::config::EngineConfig;
use crate::domain::SignalRecord;
use crate::indicators::{IndicatorRow, IndicatorSet};

use super::momentum::evaluate_macd;
use super::oscillator::RsiThresholds;
use super::trend::{evaluate_trend, TrendMode};

#[derive(Debug, Clone, PartialEq)]
pub struct SignalStateMachine {
    trend_mode: TrendMode,
    macd_zero_line: bool,
    rsi_thresholds: RsiThresholds,
}

impl SignalStateMachine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            trend_mode: config.trend_mode,
            macd_zero_line: config.macd_zero_line,
            rsi_thresholds: config.rsi_thresholds,
        }
    }

    pub fn trend_mode(&self) -> TrendMode {
        self.trend_mode
    }

    /// Record for bar `index`.
    ///
    /// Index 0 has no previous bar: its cross flags are false.
    pub fn evaluate_bar(&self, indicators: &IndicatorSet, index: usize) -> SignalRecord {
        let cur = indicators.row(index);
        let prev = match index.checked_sub(1) {
            Some(p) => indicators.row(p),
            None => IndicatorRow::default(),
        };

        let (trend_long_ok, trend_short_ok) = evaluate_trend(self.trend_mode, &cur);
        let (macd_up_ok, macd_down_ok) = evaluate_macd(&prev, &cur, self.macd_zero_line);
        let (rsi_up_ok, rsi_down_ok) = self.rsi_thresholds.evaluate(&prev, &cur);

        SignalRecord::from_flags(
            trend_long_ok,
            trend_short_ok,
            macd_up_ok,
            macd_down_ok,
            rsi_up_ok,
            rsi_down_ok,
        )
    }

    /// One record per index of `indicators`, in order.
    pub fn evaluate(&self, indicators: &IndicatorSet) -> Vec<SignalRecord> {
        (0..indicators.len())
            .map(|i| self.evaluate_bar(indicators, i))
            .collect()
    }
}
