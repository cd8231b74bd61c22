//! Bar: the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a single instrument.
///
/// Bars are produced once by whatever loads the data and are never mutated by
/// the engine. Volume is an integer share count, so it cannot be negative or
/// non-finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Name of the first price field that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
