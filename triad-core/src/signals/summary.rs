//! Run summary and output consistency checks.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Signal, SignalRecord};

use super::trend::TrendMode;

/// A record stream that breaks the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("bar {index}: buy and sell signals set together")]
    SimultaneousSignals { index: usize },

    #[error("bar {index}: signal {signal} does not match its flags")]
    SignalMismatch { index: usize, signal: Signal },
}

/// Check every record: buy and sell exclusive, `signal` consistent with them.
pub fn validate_records(records: &[SignalRecord]) -> Result<(), SummaryError> {
    for (index, r) in records.iter().enumerate() {
        if r.buy_signal && r.sell_signal {
            return Err(SummaryError::SimultaneousSignals { index });
        }
        let expected = if r.buy_signal {
            Signal::Buy
        } else if r.sell_signal {
            Signal::Sell
        } else {
            Signal::Hold
        };
        if r.signal != expected {
            return Err(SummaryError::SignalMismatch {
                index,
                signal: r.signal,
            });
        }
    }
    Ok(())
}

/// Counts and rates over one run. Rates are percentages rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub trend_mode: TrendMode,
    pub total_bars: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    pub buy_frequency_pct: f64,
    pub sell_frequency_pct: f64,
    pub signal_rate_pct: f64,
    pub first_signal_time: Option<NaiveDateTime>,
    pub last_signal_time: Option<NaiveDateTime>,
}

impl SignalSummary {
    /// `timestamps` is index-aligned with `records`; extra entries on either
    /// side are ignored for the signal times.
    pub fn from_records(
        records: &[SignalRecord],
        timestamps: &[NaiveDateTime],
        trend_mode: TrendMode,
    ) -> Self {
        let total_bars = records.len();
        let buy_signals = records.iter().filter(|r| r.signal == Signal::Buy).count();
        let sell_signals = records.iter().filter(|r| r.signal == Signal::Sell).count();
        let hold_signals = total_bars - buy_signals - sell_signals;

        let pct = |count: usize| {
            if total_bars == 0 {
                0.0
            } else {
                round2(count as f64 / total_bars as f64 * 100.0)
            }
        };

        let mut signal_times = records
            .iter()
            .zip(timestamps)
            .filter(|(r, _)| r.matches_criteria())
            .map(|(_, t)| *t);
        let first_signal_time = signal_times.next();
        let last_signal_time = signal_times.last().or(first_signal_time);

        Self {
            trend_mode,
            total_bars,
            buy_signals,
            sell_signals,
            hold_signals,
            buy_frequency_pct: pct(buy_signals),
            sell_frequency_pct: pct(sell_signals),
            signal_rate_pct: pct(buy_signals + sell_signals),
            first_signal_time,
            last_signal_time,
        }
    }

    pub fn total_signals(&self) -> usize {
        self.buy_signals + self.sell_signals
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(minute: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn buy() -> SignalRecord {
        SignalRecord::from_flags(true, false, true, false, true, false)
    }

    fn sell() -> SignalRecord {
        SignalRecord::from_flags(false, true, false, true, false, true)
    }

    #[test]
    fn counts_and_rates() {
        let records = vec![SignalRecord::hold(), buy(), SignalRecord::hold(), sell()];
        let times: Vec<_> = (0..4).map(|i| ts(i * 15)).collect();
        let s = SignalSummary::from_records(&records, &times, TrendMode::Pullback);

        assert_eq!(s.total_bars, 4);
        assert_eq!((s.buy_signals, s.sell_signals, s.hold_signals), (1, 1, 2));
        assert_eq!(s.buy_frequency_pct, 25.0);
        assert_eq!(s.sell_frequency_pct, 25.0);
        assert_eq!(s.signal_rate_pct, 50.0);
        assert_eq!(s.total_signals(), 2);
        assert_eq!(s.first_signal_time, Some(ts(15)));
        assert_eq!(s.last_signal_time, Some(ts(45)));
    }

    #[test]
    fn rates_round_to_two_decimals() {
        let mut records = vec![SignalRecord::hold(); 13];
        records[3] = buy();
        records[9] = buy();
        records[11] = sell();
        let times: Vec<_> = (0..13).map(|i| ts(i * 4)).collect();
        let s = SignalSummary::from_records(&records, &times, TrendMode::Pullback);

        assert_eq!(s.buy_frequency_pct, 15.38);
        assert_eq!(s.sell_frequency_pct, 7.69);
        assert_eq!(s.signal_rate_pct, 23.08);
    }

    #[test]
    fn single_signal_is_first_and_last() {
        let records = vec![SignalRecord::hold(), buy()];
        let times = vec![ts(0), ts(15)];
        let s = SignalSummary::from_records(&records, &times, TrendMode::Stacked);
        assert_eq!(s.first_signal_time, Some(ts(15)));
        assert_eq!(s.last_signal_time, Some(ts(15)));
    }

    #[test]
    fn empty_run_has_zero_rates() {
        let s = SignalSummary::from_records(&[], &[], TrendMode::Pullback);
        assert_eq!(s.total_bars, 0);
        assert_eq!(s.signal_rate_pct, 0.0);
        assert_eq!(s.first_signal_time, None);
        assert_eq!(s.last_signal_time, None);
    }

    #[test]
    fn validate_accepts_machine_output() {
        assert!(validate_records(&[SignalRecord::hold(), buy(), sell()]).is_ok());
    }

    #[test]
    fn validate_flags_simultaneous_signals() {
        let mut bad = buy();
        bad.sell_signal = true;
        assert_eq!(
            validate_records(&[SignalRecord::hold(), bad]),
            Err(SummaryError::SimultaneousSignals { index: 1 })
        );
    }

    #[test]
    fn validate_flags_mismatched_signal() {
        let mut bad = sell();
        bad.signal = Signal::Hold;
        assert_eq!(
            validate_records(&[bad]),
            Err(SummaryError::SignalMismatch {
                index: 0,
                signal: Signal::Hold
            })
        );
    }
}
