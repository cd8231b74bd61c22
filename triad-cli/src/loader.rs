//! CSV bar loading.
//!
//! Expected header: `timestamp,open,high,low,close,volume`. Capitalized
//! headers (`Datetime`, `Open`, ...) as written by common market-data exports
//! are accepted too. Timestamps carrying a UTC offset (`2024-01-02
//! 09:30:00-05:00`) keep their local wall-clock time and drop the offset. Rows must already be in time order; the loader rejects
//! rather than sorts, since a reordered file usually means a broken export.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use triad_core::domain::{Bar, BarSeries};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"];

#[derive(Debug, Deserialize)]
struct CsvBar {
    #[serde(alias = "Datetime", alias = "datetime", alias = "Date", alias = "date")]
    timestamp: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

/// Parse a timestamp as `%Y-%m-%d %H:%M:%S`, `%Y-%m-%dT%H:%M:%S`, either of
/// those followed by a `+HH:MM` / `-HH:MM` offset, or a bare `%Y-%m-%d` date
/// (midnight).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Ok(ts.naive_local());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    bail!("unrecognized timestamp '{raw}'")
}

/// Volume must be a non-negative whole number that fits in `u64`; `1200.0`
/// is accepted.
fn parse_volume(volume: f64, line: usize) -> Result<u64> {
    if !volume.is_finite() || volume < 0.0 || volume.fract() != 0.0 {
        bail!("row {line}: volume must be a non-negative integer (got {volume})");
    }
    // u64::MAX rounds up to 2^64 as f64
    if volume >= u64::MAX as f64 {
        bail!("row {line}: volume {volume} exceeds the u64 range");
    }
    Ok(volume as u64)
}

/// Read and validate bars from any CSV source.
pub fn read_bars<R: Read>(reader: R) -> Result<BarSeries> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (i, row) in rdr.deserialize::<CsvBar>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row.with_context(|| format!("row {line}: malformed CSV record"))?;
        let timestamp = parse_timestamp(&row.timestamp).with_context(|| format!("row {line}"))?;
        bars.push(Bar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: parse_volume(row.volume, line)?,
        });
    }

    let inconsistent = bars.iter().filter(|b| !b.is_sane()).count();
    if inconsistent > 0 {
        tracing::warn!(
            count = inconsistent,
            "bars with inconsistent OHLC values (high below low or non-positive price)"
        );
    }

    BarSeries::new(bars).context("invalid bar series")
}

/// Load bars from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<BarSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let series = read_bars(file).with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        bars = series.len(),
        first = %series.first().timestamp,
        last = %series.last().timestamp,
        "bars loaded"
    );
    Ok(series)
}
