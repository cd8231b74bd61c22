//! MACD cross filter.
//!
//! Reads the MACD line and its signal line at the previous and current bar.
//! A cross-up needs the line to be at or below the signal at `i-1` and strictly
//! above it at `i`; a cross-down is the mirror image. With the zero-line gate
//! on, a cross-up only counts when both lines are below zero at `i` and a
//! cross-down only when both are above zero.

use crate::indicators::IndicatorRow;

/// `(macd_up_ok, macd_down_ok)` for the bar pair `(prev, cur)`.
///
/// Any undefined value makes both flags false.
pub fn evaluate_macd(prev: &IndicatorRow, cur: &IndicatorRow, zero_line: bool) -> (bool, bool) {
    let up = macd_cross_up(prev, cur, zero_line).unwrap_or(false);
    let down = macd_cross_down(prev, cur, zero_line).unwrap_or(false);
    (up, down)
}

fn macd_cross_up(prev: &IndicatorRow, cur: &IndicatorRow, zero_line: bool) -> Option<bool> {
    let (prev_line, prev_signal) = (prev.macd?, prev.macd_signal?);
    let (line, signal) = (cur.macd?, cur.macd_signal?);

    let crossed = prev_line <= prev_signal && line > signal;
    let below_zero = line < 0.0 && signal < 0.0;
    Some(crossed && (!zero_line || below_zero))
}

fn macd_cross_down(prev: &IndicatorRow, cur: &IndicatorRow, zero_line: bool) -> Option<bool> {
    let (prev_line, prev_signal) = (prev.macd?, prev.macd_signal?);
    let (line, signal) = (cur.macd?, cur.macd_signal?);

    let crossed = prev_line >= prev_signal && line < signal;
    let above_zero = line > 0.0 && signal > 0.0;
    Some(crossed && (!zero_line || above_zero))
}
