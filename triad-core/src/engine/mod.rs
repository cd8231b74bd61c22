//! Engine orchestration: validate, precompute, evaluate.
//!
//! `SignalEngine::run` is the strict entry point: it rejects a series that is
//! too short for the configured indicators before emitting anything.
//! `run_partial` computes on any valid series and leaves it to the caller to
//! keep `first_complete_index()..`.

pub mod precompute;
pub mod warmup;

pub use precompute::precompute_indicators;
pub use warmup::{check_history, required_history, HistoryRequirement};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::{BarSeries, SignalRecord};
use crate::error::EngineError;
use crate::indicators::IndicatorSet;
use crate::signals::{SignalStateMachine, SignalSummary};

/// Indicators and records for one series, index-aligned with its bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub indicators: IndicatorSet,
    pub records: Vec<SignalRecord>,
}

impl EngineOutput {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First index where every indicator is defined.
    pub fn first_complete_index(&self) -> Option<usize> {
        self.indicators.first_complete_index()
    }
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    machine: SignalStateMachine,
}

impl SignalEngine {
    /// Validates `config` up front so later stages never see bad windows.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let machine = SignalStateMachine::new(&config);
        Ok(Self { config, machine })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full run. Fails with `InsufficientHistory` on a short series.
    pub fn run(&self, series: &BarSeries) -> Result<EngineOutput, EngineError> {
        check_history(&self.config, series.len())?;
        Ok(self.evaluate(series))
    }

    /// Run without the history check.
    ///
    /// Indices before `first_complete_index()` are HOLD with every flag that
    /// needs an undefined value set to false.
    pub fn run_partial(&self, series: &BarSeries) -> EngineOutput {
        if let Err(err) = check_history(&self.config, series.len()) {
            warn!(%err, "running on a short series; early records are warm-up only");
        }
        self.evaluate(series)
    }

    /// Summary of `output`, which must come from `series`.
    pub fn summarize(&self, series: &BarSeries, output: &EngineOutput) -> SignalSummary {
        let timestamps: Vec<_> = series.bars().iter().map(|b| b.timestamp).collect();
        SignalSummary::from_records(&output.records, &timestamps, self.config.trend_mode)
    }

    fn evaluate(&self, series: &BarSeries) -> EngineOutput {
        debug!(
            bars = series.len(),
            trend_mode = %self.config.trend_mode,
            rsi_method = %self.config.rsi.method,
            "engine run started"
        );

        let indicators = precompute_indicators(series, &self.config);
        let records = self.machine.evaluate(&indicators);

        let buys = records.iter().filter(|r| r.buy_signal).count();
        let sells = records.iter().filter(|r| r.sell_signal).count();
        info!(
            bars = records.len(),
            buys,
            sells,
            trend_mode = %self.config.trend_mode,
            "signal evaluation complete"
        );

        EngineOutput {
            indicators,
            records,
        }
    }
}
