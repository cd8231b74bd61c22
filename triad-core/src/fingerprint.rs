//! Run fingerprinting: deterministic identity of a config, a dataset, and the
//! record stream a run produced.
//!
//! All hashes are blake3 over the canonical serde_json encoding. Struct
//! fields serialize in declaration order, so the encoding is stable for a
//! given build.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{BarSeries, SignalRecord};

fn hash_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(blake3::hash(&json).to_hex().to_string())
}

/// Hash of every engine parameter.
pub fn config_hash(config: &EngineConfig) -> Result<String, serde_json::Error> {
    hash_json(config)
}

/// Hash of the input bars.
pub fn dataset_hash(series: &BarSeries) -> Result<String, serde_json::Error> {
    hash_json(series.bars())
}

/// Hash of a record stream. Equal for two runs of the same input and config.
pub fn records_hash(records: &[SignalRecord]) -> Result<String, serde_json::Error> {
    hash_json(records)
}

/// Identity of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub config_hash: String,
    pub dataset_hash: String,
    pub records_hash: String,
    pub bars: usize,
}

impl RunFingerprint {
    pub fn new(
        config: &EngineConfig,
        series: &BarSeries,
        records: &[SignalRecord],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            config_hash: config_hash(config)?,
            dataset_hash: dataset_hash(series)?,
            records_hash: records_hash(records)?,
            bars: series.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;
    use crate::signals::TrendMode;

    #[test]
    fn config_hash_is_deterministic() {
        let a = config_hash(&EngineConfig::default()).unwrap();
        let b = config_hash(&EngineConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn config_hash_tracks_parameters() {
        let base = config_hash(&EngineConfig::default()).unwrap();
        let stacked =
            config_hash(&EngineConfig::default().with_trend_mode(TrendMode::Stacked)).unwrap();
        let mut longer = EngineConfig::default();
        longer.sma.long = 250;
        assert_ne!(base, stacked);
        assert_ne!(base, config_hash(&longer).unwrap());
    }

    #[test]
    fn records_hash_sees_single_flag() {
        let mut records = vec![SignalRecord::hold(); 5];
        let before = records_hash(&records).unwrap();
        records[3].rsi_up_ok = true;
        assert_ne!(before, records_hash(&records).unwrap());
    }

    #[test]
    fn dataset_hash_sees_price_change() {
        let a = BarSeries::new(make_bars(&[1.0, 2.0, 3.0])).unwrap();
        let b = BarSeries::new(make_bars(&[1.0, 2.0, 3.5])).unwrap();
        assert_ne!(dataset_hash(&a).unwrap(), dataset_hash(&b).unwrap());
    }

    #[test]
    fn fingerprint_roundtrip() {
        let series = BarSeries::new(make_bars(&[1.0, 2.0, 3.0])).unwrap();
        let fp = RunFingerprint::new(&EngineConfig::default(), &series, &[SignalRecord::hold(); 3])
            .unwrap();
        assert_eq!(fp.bars, 3);
        let json = serde_json::to_string(&fp).unwrap();
        let back: RunFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }
}
