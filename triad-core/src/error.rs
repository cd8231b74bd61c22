//! Error taxonomy for the engine.
//!
//! Structural problems with the input (`SeriesError`) and short histories
//! (`EngineError::InsufficientHistory`) are surfaced before any record is
//! emitted. Undefined indicator values are not errors: they degrade to
//! `false` flags and `HOLD`.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A bar sequence that cannot be processed without shifting alignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar series is empty")]
    Empty,

    #[error("bar {index}: non-finite {field}")]
    NonFinite { index: usize, field: &'static str },

    #[error("bar {index}: timestamp {current} does not follow {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },
}

/// Invalid or unreadable engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors returned by the strict engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed series: {0}")]
    MalformedSeries(#[from] SeriesError),

    #[error("insufficient history for {indicator}: need {required} bars, have {available}")]
    InsufficientHistory {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_history_message_names_indicator() {
        let err = EngineError::InsufficientHistory {
            indicator: "sma_200".into(),
            required: 200,
            available: 150,
        };
        assert_eq!(
            err.to_string(),
            "insufficient history for sma_200: need 200 bars, have 150"
        );
    }

    #[test]
    fn series_error_converts_into_engine_error() {
        let err: EngineError = SeriesError::Empty.into();
        assert!(matches!(err, EngineError::MalformedSeries(SeriesError::Empty)));
    }
}
