//! RSI midline cross filter.
//!
//! A cross-up needs RSI strictly below the midline at `i-1` and strictly above
//! the buy threshold at `i`. A cross-down needs RSI strictly above the midline
//! at `i-1` and strictly below the sell threshold at `i`. The gap between the
//! midline and each threshold keeps a drift of a fraction of a point from
//! counting as a cross.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorRow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiThresholds {
    pub midline: f64,
    pub buy: f64,
    pub sell: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            midline: 50.0,
            buy: 52.0,
            sell: 48.0,
        }
    }
}

impl RsiThresholds {
    /// Levels must lie in [0, 100] with `sell <= midline <= buy`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("midline", self.midline), ("buy", self.buy), ("sell", self.sell)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("rsi_thresholds.{name} must be within [0, 100] (got {value})"));
            }
        }
        if !(self.sell <= self.midline && self.midline <= self.buy) {
            return Err(format!(
                "rsi_thresholds must satisfy sell <= midline <= buy (got {}/{}/{})",
                self.sell, self.midline, self.buy
            ));
        }
        Ok(())
    }

    /// `(rsi_up_ok, rsi_down_ok)` for the bar pair `(prev, cur)`.
    ///
    /// Any undefined value makes both flags false.
    pub fn evaluate(&self, prev: &IndicatorRow, cur: &IndicatorRow) -> (bool, bool) {
        match (prev.rsi, cur.rsi) {
            (Some(prev), Some(cur)) => (
                prev < self.midline && cur > self.buy,
                prev > self.midline && cur < self.sell,
            ),
            _ => (false, false),
        }
    }
}
