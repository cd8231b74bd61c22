//! Moving Average Convergence Divergence (MACD).
//!
//! Two lines (separate Indicator instances):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal), seeded with the SMA of the first `signal` defined line values
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for the signal line.
//! Both report `slow + signal` as their minimum history so that the signal
//! line has two points for cross detection.

use super::ema::{ema_of_defined, ema_of_series};
use super::Indicator;
use crate::domain::Bar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdBand {
    Line,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    band: MacdBand,
    name: String,
}

/// Both MACD lines for one series, index-aligned with the bars.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(fast, slow, signal, MacdBand::Line, format!("macd_{fast}_{slow}_{signal}"))
    }

    pub fn signal_line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(
            fast,
            slow,
            signal,
            MacdBand::Signal,
            format!("macd_signal_{fast}_{slow}_{signal}"),
        )
    }

    fn build(fast: usize, slow: usize, signal: usize, band: MacdBand, name: String) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self {
            fast,
            slow,
            signal,
            band,
            name,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.band {
            MacdBand::Line => self.slow - 1,
            MacdBand::Signal => self.slow + self.signal - 2,
        }
    }

    fn min_bars(&self) -> usize {
        self.slow + self.signal
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let series = macd_of_series(&closes, self.fast, self.slow, self.signal);
        match self.band {
            MacdBand::Line => series.line,
            MacdBand::Signal => series.signal,
        }
    }
}

/// Compute both MACD lines from a close slice.
///
/// The line is `None` until the slow EMA is seeded; it is never filled with
/// zero, which would fake a cross at the warm-up boundary.
pub fn macd_of_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = ema_of_series(values, fast);
    let ema_slow = ema_of_series(values, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();
    let signal = ema_of_defined(&line, signal);

    MacdSeries { line, signal }
}
