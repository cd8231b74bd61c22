//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (one value needs `period` prior moves).
//!
//! Two averaging methods:
//! - Wilder: seed with the simple mean of the first `period` moves, then
//!   avg[i] = (avg[i-1] * (period - 1) + move[i]) / period
//! - Simple: plain mean of the last `period` moves, recomputed at every bar
//!
//! Edge cases: avg_loss == 0 and avg_gain > 0 → 100; both zero → 50 (flat).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Indicator;
use crate::domain::Bar;

/// Averaging method for gains and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiMethod {
    #[default]
    Wilder,
    Simple,
}

impl fmt::Display for RsiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiMethod::Wilder => f.write_str("wilder"),
            RsiMethod::Simple => f.write_str("simple"),
        }
    }
}

impl FromStr for RsiMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wilder" => Ok(RsiMethod::Wilder),
            "simple" => Ok(RsiMethod::Simple),
            other => Err(format!("unknown RSI method '{other}' (expected wilder or simple)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    method: RsiMethod,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_method(period, RsiMethod::Wilder)
    }

    pub fn simple(period: usize) -> Self {
        Self::with_method(period, RsiMethod::Simple)
    }

    pub fn with_method(period: usize, method: RsiMethod) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        let name = match method {
            RsiMethod::Wilder => format!("rsi_{period}"),
            RsiMethod::Simple => format!("rsi_simple_{period}"),
        };
        Self {
            period,
            method,
            name,
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rsi_of_series(&closes, self.period, self.method)
    }
}

/// RSI of an arbitrary close slice.
pub fn rsi_of_series(values: &[f64], period: usize, method: RsiMethod) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // gains[i] / losses[i] describe the move from i-1 to i; index 0 is unused.
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    let p = period as f64;
    match method {
        RsiMethod::Wilder => {
            let mut avg_gain = gains[1..=period].iter().sum::<f64>() / p;
            let mut avg_loss = losses[1..=period].iter().sum::<f64>() / p;
            result[period] = Some(compute_rsi(avg_gain, avg_loss));

            for i in (period + 1)..n {
                avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
                avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
                result[i] = Some(compute_rsi(avg_gain, avg_loss));
            }
        }
        RsiMethod::Simple => {
            for i in period..n {
                let window = (i + 1 - period)..=i;
                let avg_gain = gains[window.clone()].iter().sum::<f64>() / p;
                let avg_loss = losses[window].iter().sum::<f64>() / p;
                result[i] = Some(compute_rsi(avg_gain, avg_loss));
            }
        }
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
