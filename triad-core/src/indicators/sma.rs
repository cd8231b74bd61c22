//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        sma_of_series(&closes, self.period)
    }
}

/// Rolling mean of an arbitrary slice.
///
/// Keeps a running sum; the window is re-summed every `period` steps so
/// float drift cannot accumulate over long series.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let mut sum: f64 = values[..period].iter().sum();
    result[period - 1] = Some(sum / period as f64);

    for i in period..n {
        if (i + 1) % period == 0 {
            sum = values[(i + 1 - period)..=i].iter().sum();
        } else {
            sum += values[i] - values[i - period];
        }
        result[i] = Some(sum / period as f64);
    }

    result
}
