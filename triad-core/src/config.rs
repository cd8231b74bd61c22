//! Serializable engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config and
//! reproduces the standard 20/50/200 SMA, 12/26/9 MACD, 14-period Wilder RSI
//! setup with 50/52/48 RSI thresholds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::indicators::{Indicator, Macd, Rsi, RsiMethod, Sma};
use crate::signals::{RsiThresholds, TrendMode};

/// Windows of the three trend SMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaPeriods {
    pub short: usize,
    pub mid: usize,
    pub long: usize,
}

impl Default for SmaPeriods {
    fn default() -> Self {
        Self {
            short: 20,
            mid: 50,
            long: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
    pub method: RsiMethod,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: 14,
            method: RsiMethod::Wilder,
        }
    }
}

/// Complete configuration of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trend_mode: TrendMode,
    /// Require MACD crosses to happen on the far side of the zero line.
    pub macd_zero_line: bool,
    pub sma: SmaPeriods,
    pub macd: MacdParams,
    pub rsi: RsiParams,
    pub rsi_thresholds: RsiThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_mode: TrendMode::Pullback,
            macd_zero_line: true,
            sma: SmaPeriods::default(),
            macd: MacdParams::default(),
            rsi: RsiParams::default(),
            rsi_thresholds: RsiThresholds::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_trend_mode(mut self, trend_mode: TrendMode) -> Self {
        self.trend_mode = trend_mode;
        self
    }

    pub fn with_rsi_method(mut self, method: RsiMethod) -> Self {
        self.rsi.method = method;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SmaPeriods { short, mid, long } = self.sma;
        if short == 0 {
            return Err(ConfigError::Invalid("sma.short must be >= 1".into()));
        }
        if !(short < mid && mid < long) {
            return Err(ConfigError::Invalid(format!(
                "sma periods must be strictly increasing (got {short}/{mid}/{long})"
            )));
        }

        let MacdParams { fast, slow, signal } = self.macd;
        if fast == 0 || signal == 0 {
            return Err(ConfigError::Invalid(
                "macd.fast and macd.signal must be >= 1".into(),
            ));
        }
        if slow <= fast {
            return Err(ConfigError::Invalid(format!(
                "macd.slow ({slow}) must be greater than macd.fast ({fast})"
            )));
        }

        if self.rsi.period == 0 {
            return Err(ConfigError::Invalid("rsi.period must be >= 1".into()));
        }

        self.rsi_thresholds.validate().map_err(ConfigError::Invalid)
    }

    /// Every indicator this config needs, in `IndicatorSet` field order.
    pub fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        let MacdParams { fast, slow, signal } = self.macd;
        vec![
            Box::new(Sma::new(self.sma.short)),
            Box::new(Sma::new(self.sma.mid)),
            Box::new(Sma::new(self.sma.long)),
            Box::new(Macd::line(fast, slow, signal)),
            Box::new(Macd::signal_line(fast, slow, signal)),
            Box::new(Rsi::with_method(self.rsi.period, self.rsi.method)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.trend_mode, TrendMode::Pullback);
        assert_eq!(config.rsi.method, RsiMethod::Wilder);
        assert!(config.macd_zero_line);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = EngineConfig::from_toml(
            r#"
trend_mode = "stacked"

[rsi]
method = "simple"

[rsi_thresholds]
buy = 55.0
sell = 45.0
"#,
        )
        .unwrap();
        assert_eq!(config.trend_mode, TrendMode::Stacked);
        assert_eq!(config.rsi.method, RsiMethod::Simple);
        assert_eq!(config.rsi.period, 14);
        assert_eq!(config.rsi_thresholds.buy, 55.0);
        assert_eq!(config.rsi_thresholds.midline, 50.0);
        assert_eq!(config.sma, SmaPeriods::default());
    }

    #[test]
    fn toml_roundtrip() {
        let config = EngineConfig::default()
            .with_trend_mode(TrendMode::Stacked)
            .with_rsi_method(RsiMethod::Simple);
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unordered_sma_periods() {
        let err = EngineConfig::from_toml("[sma]\nshort = 50\nmid = 20\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_fast_macd_not_below_slow() {
        let err = EngineConfig::from_toml("[macd]\nfast = 30\n").unwrap_err();
        assert!(err.to_string().contains("macd.slow"));
    }

    #[test]
    fn rejects_zero_rsi_period() {
        let err = EngineConfig::from_toml("[rsi]\nperiod = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_trend_mode() {
        let err = EngineConfig::from_toml("trend_mode = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn indicators_follow_config() {
        let names: Vec<String> = EngineConfig::default()
            .indicators()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "sma_20",
                "sma_50",
                "sma_200",
                "macd_12_26_9",
                "macd_signal_12_26_9",
                "rsi_14"
            ]
        );
    }
}
