//! Domain types: bars, validated series, per-bar signal records.

pub mod bar;
pub mod series;
pub mod signal;

pub use bar::Bar;
pub use series::BarSeries;
pub use signal::{Signal, SignalRecord};
