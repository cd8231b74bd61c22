//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1)
//! Seed: EMA[period-1] = SMA of first `period` close values.
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.period)
    }
}

/// EMA of a fully defined slice.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let defined: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema_of_defined(&defined, period)
}

/// EMA of a series whose leading entries may be undefined.
///
/// Seeds with the SMA of the first `period` defined values, placed at the
/// index of the last of them. An undefined value after the first defined one
/// taints the rest of the output. Used for the MACD signal line, whose input
/// only starts once the slow EMA has warmed up.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 {
        return result;
    }

    let Some(start) = values.iter().position(|v| v.is_some()) else {
        return result;
    };
    let seed_end = start + period - 1;
    if seed_end >= n {
        return result;
    }

    let mut sum = 0.0;
    for v in &values[start..=seed_end] {
        match v {
            Some(v) => sum += v,
            None => return result, // gap inside the seed window
        }
    }
    let seed = sum / period as f64;
    result[seed_end] = Some(seed);

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = seed;
    for i in (seed_end + 1)..n {
        let Some(v) = values[i] else {
            return result;
        };
        let ema = v * alpha + prev * (1.0 - alpha);
        result[i] = Some(ema);
        prev = ema;
    }

    result
}
