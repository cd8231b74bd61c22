//! Triad core: SMA / MACD / RSI indicators and the BUY / SELL / HOLD signal
//! state machine.
//!
//! - Domain types (bars, validated series, per-bar signal records)
//! - Indicator trait and implementations, precomputed into an `IndicatorSet`
//! - Signal rules: trend table, MACD cross, RSI cross
//! - Engine orchestration with history checks
//! - Serializable configuration and run fingerprints
//!
//! The record for bar `i` depends only on bars `0..=i`.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod signals;

pub use config::EngineConfig;
pub use domain::{Bar, BarSeries, Signal, SignalRecord};
pub use engine::{EngineOutput, SignalEngine};
pub use error::{ConfigError, EngineError, SeriesError};
pub use indicators::{IndicatorSet, RsiMethod};
pub use signals::{SignalSummary, TrendMode};
