//! Aligned indicator series for one bar series.

use serde::{Deserialize, Serialize};

/// The six series the signal rules read, one entry per bar.
///
/// Built once by `engine::precompute` (or by hand in tests) and read-only
/// afterwards. `None` marks a warm-up index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_short: Vec<Option<f64>>,
    pub sma_mid: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

/// Snapshot of every indicator at one index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub sma_short: Option<f64>,
    pub sma_mid: Option<f64>,
    pub sma_long: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorRow {
    /// True when all six values are defined.
    pub fn is_complete(&self) -> bool {
        self.sma_short.is_some()
            && self.sma_mid.is_some()
            && self.sma_long.is_some()
            && self.macd.is_some()
            && self.macd_signal.is_some()
            && self.rsi.is_some()
    }
}

impl IndicatorSet {
    /// Number of bars covered. All six series have this length.
    pub fn len(&self) -> usize {
        self.sma_short.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma_short.is_empty()
    }

    /// True when every series has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        [
            self.sma_mid.len(),
            self.sma_long.len(),
            self.macd.len(),
            self.macd_signal.len(),
            self.rsi.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }

    /// Values at `index`. Out-of-range indices read as undefined.
    pub fn row(&self, index: usize) -> IndicatorRow {
        let at = |series: &Vec<Option<f64>>| series.get(index).copied().flatten();
        IndicatorRow {
            sma_short: at(&self.sma_short),
            sma_mid: at(&self.sma_mid),
            sma_long: at(&self.sma_long),
            macd: at(&self.macd),
            macd_signal: at(&self.macd_signal),
            rsi: at(&self.rsi),
        }
    }

    /// First index where all six indicators are defined.
    ///
    /// Callers that ran on a short series can keep `first_complete_index()..`
    /// as the valid range.
    pub fn first_complete_index(&self) -> Option<usize> {
        (0..self.len()).find(|&i| self.row(i).is_complete())
    }
}
