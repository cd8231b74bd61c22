//! Signal rules and the per-bar state machine.
//!
//! Signals read only precomputed indicator rows at `i-1` and `i`. They never
//! see bars after `i` and keep no state between bars.

pub mod machine;
pub mod momentum;
pub mod oscillator;
pub mod summary;
pub mod trend;

pub use machine::SignalStateMachine;
pub use momentum::evaluate_macd;
pub use oscillator::RsiThresholds;
pub use summary::{validate_records, SignalSummary, SummaryError};
pub use trend::{evaluate_trend, TrendMode, TrendRule, TREND_RULES};
