//! History requirements.
//!
//! Each indicator reports how many bars it needs before it can feed cross
//! detection (`Indicator::min_bars`). A series shorter than the largest of
//! these is rejected by the strict engine entry points.

use crate::config::EngineConfig;
use crate::error::EngineError;

/// The indicator that needs the most history, and how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequirement {
    pub indicator: String,
    pub min_bars: usize,
}

/// Largest `min_bars` among the indicators `config` builds.
///
/// Ties go to the indicator listed first.
pub fn required_history(config: &EngineConfig) -> HistoryRequirement {
    let mut best = HistoryRequirement {
        indicator: String::new(),
        min_bars: 0,
    };
    for indicator in config.indicators() {
        if indicator.min_bars() > best.min_bars {
            best = HistoryRequirement {
                indicator: indicator.name().to_string(),
                min_bars: indicator.min_bars(),
            };
        }
    }
    best
}

/// `InsufficientHistory` when `available` bars do not cover every indicator.
pub fn check_history(config: &EngineConfig, available: usize) -> Result<(), EngineError> {
    let HistoryRequirement {
        indicator,
        min_bars,
    } = required_history(config);
    if available < min_bars {
        return Err(EngineError::InsufficientHistory {
            indicator,
            required: min_bars,
            available,
        });
    }
    Ok(())
}
