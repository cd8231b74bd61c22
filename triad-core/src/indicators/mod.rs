//! Concrete indicator implementations.
//!
//! SMA, EMA, MACD and RSI all implement the `Indicator` trait. They are
//! precomputed once before signal evaluation and collected into an
//! `IndicatorSet`.
//!
//! MACD is exposed as two named instances (line and signal line), keeping the
//! single-series `Indicator` trait unchanged.

pub mod ema;
pub mod indicator;
pub mod macd;
pub mod rsi;
pub mod set;
pub mod sma;

pub use ema::Ema;
pub use indicator::Indicator;
pub use macd::{Macd, MacdBand, MacdSeries};
pub use rsi::{Rsi, RsiMethod};
pub use set::{IndicatorRow, IndicatorSet};
pub use sma::Sma;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
/// Bars are 15 minutes apart.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                timestamp: base + chrono::Duration::minutes(15 * i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
