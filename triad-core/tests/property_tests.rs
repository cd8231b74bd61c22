//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. RSI bounds: every defined RSI value lies in [0, 100]
//! 2. Mutual exclusivity: no record is both BUY and SELL
//! 3. Determinism: two runs produce identical records and hashes
//! 4. No look-ahead: mutating bars after t never changes records up to t

use chrono::NaiveDate;
use proptest::prelude::*;
use triad_core::config::{MacdParams, RsiParams, SmaPeriods};
use triad_core::domain::{Bar, BarSeries};
use triad_core::fingerprint::records_hash;
use triad_core::indicators::rsi::rsi_of_series;
use triad_core::signals::validate_records;
use triad_core::{EngineConfig, RsiMethod, SignalEngine, TrendMode};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk of closes built from per-bar returns in [-4%, +4%].
fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.04..0.04_f64, min_len..max_len).prop_map(|returns| {
        let mut price = 100.0;
        returns
            .into_iter()
            .map(|r| {
                price *= 1.0 + r;
                (price * 100.0).round() / 100.0
            })
            .collect()
    })
}

fn arb_mode() -> impl Strategy<Value = TrendMode> {
    prop_oneof![Just(TrendMode::Pullback), Just(TrendMode::Stacked)]
}

fn arb_method() -> impl Strategy<Value = RsiMethod> {
    prop_oneof![Just(RsiMethod::Wilder), Just(RsiMethod::Simple)]
}

/// Short windows so that random walks of a few hundred bars produce signals.
fn fast_config(trend_mode: TrendMode, method: RsiMethod) -> EngineConfig {
    EngineConfig {
        trend_mode,
        macd_zero_line: true,
        sma: SmaPeriods {
            short: 3,
            mid: 8,
            long: 21,
        },
        macd: MacdParams {
            fast: 3,
            slow: 7,
            signal: 3,
        },
        rsi: RsiParams { period: 4, method },
        ..EngineConfig::default()
    }
}

fn to_series(closes: &[f64]) -> BarSeries {
    let base = NaiveDate::from_ymd_opt(2023, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: base + chrono::Duration::hours(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 500,
        })
        .collect();
    BarSeries::new(bars).unwrap()
}

// ── 1. RSI Bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_stays_in_bounds(
        closes in arb_closes(2, 200),
        period in 1usize..30,
        method in arb_method(),
    ) {
        for (i, v) in rsi_of_series(&closes, period, method).iter().enumerate() {
            if let Some(v) = v {
                prop_assert!((0.0..=100.0).contains(v), "RSI {} out of bounds at {}", v, i);
            }
        }
    }

    /// Strictly rising closes give RSI = 100 once defined.
    #[test]
    fn rsi_all_up_is_hundred(steps in prop::collection::vec(0.01..5.0_f64, 16..60)) {
        let mut price = 50.0;
        let closes: Vec<f64> = steps.iter().map(|s| { price += s; price }).collect();
        for method in [RsiMethod::Wilder, RsiMethod::Simple] {
            let rsi = rsi_of_series(&closes, 14, method);
            prop_assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
        }
    }
}

// ── 2. Mutual Exclusivity ────────────────────────────────────────────

proptest! {
    #[test]
    fn buy_and_sell_are_exclusive(
        closes in arb_closes(30, 300),
        mode in arb_mode(),
        method in arb_method(),
    ) {
        let engine = SignalEngine::new(fast_config(mode, method)).unwrap();
        let output = engine.run_partial(&to_series(&closes));
        prop_assert_eq!(output.len(), closes.len());
        for r in &output.records {
            prop_assert!(!(r.buy_signal && r.sell_signal));
            prop_assert!(!(r.trend_long_ok && r.trend_short_ok));
        }
        prop_assert!(validate_records(&output.records).is_ok());
    }
}

// ── 3. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn runs_are_deterministic(
        closes in arb_closes(30, 300),
        mode in arb_mode(),
        method in arb_method(),
    ) {
        let engine = SignalEngine::new(fast_config(mode, method)).unwrap();
        let series = to_series(&closes);
        let a = engine.run_partial(&series);
        let b = engine.run_partial(&series);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(records_hash(&a.records).unwrap(), records_hash(&b.records).unwrap());
    }
}

// ── 4. No Look-ahead ─────────────────────────────────────────────────

proptest! {
    /// Rescaling every bar after the cut leaves the prefix untouched.
    #[test]
    fn future_bars_do_not_change_past_records(
        closes in arb_closes(30, 300),
        cut_frac in 0.0..1.0_f64,
        factor in 0.5..1.5_f64,
        mode in arb_mode(),
        method in arb_method(),
    ) {
        let cut = ((closes.len() - 1) as f64 * cut_frac) as usize;
        let mut mutated = closes.clone();
        for c in &mut mutated[cut + 1..] {
            *c *= factor;
        }

        let engine = SignalEngine::new(fast_config(mode, method)).unwrap();
        let baseline = engine.run_partial(&to_series(&closes));
        let changed = engine.run_partial(&to_series(&mutated));

        prop_assert_eq!(&baseline.records[..=cut], &changed.records[..=cut]);
        prop_assert_eq!(&baseline.indicators.sma_long[..=cut], &changed.indicators.sma_long[..=cut]);
        prop_assert_eq!(&baseline.indicators.macd_signal[..=cut], &changed.indicators.macd_signal[..=cut]);
        prop_assert_eq!(&baseline.indicators.rsi[..=cut], &changed.indicators.rsi[..=cut]);
    }
}
