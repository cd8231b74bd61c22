//! Run export: per-bar signals CSV and a JSON run manifest.
//!
//! The CSV carries the bars, every indicator, the six sub-condition flags,
//! and the final signal, one row per bar. Numbers are rounded to 4 decimals;
//! undefined indicator values are written as empty cells.
//!
//! The manifest records what produced the CSV (config, hashes, summary) and
//! carries a `schema_version`. Unknown versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use triad_core::fingerprint::RunFingerprint;
use triad_core::{BarSeries, EngineConfig, EngineOutput, SignalSummary, TrendMode};

pub const SCHEMA_VERSION: u32 = 1;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── CSV export ─────────────────────────────────────────────────────

fn fmt_value(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}

fn fmt_flag(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Column names; the SMA columns are named after the configured windows.
pub fn signal_columns(config: &EngineConfig) -> Vec<String> {
    let mut columns: Vec<String> = ["timestamp", "open", "high", "low", "close", "volume"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    columns.extend([
        format!("sma_{}", config.sma.short),
        format!("sma_{}", config.sma.mid),
        format!("sma_{}", config.sma.long),
    ]);
    columns.extend(
        [
            "macd",
            "macd_signal",
            "rsi",
            "trend_long_ok",
            "trend_short_ok",
            "macd_up_ok",
            "macd_down_ok",
            "rsi_up_ok",
            "rsi_down_ok",
            "buy_signal",
            "sell_signal",
            "signal",
            "matches_criteria",
        ]
        .iter()
        .map(|c| c.to_string()),
    );
    columns
}

/// Render the per-bar signals table.
pub fn export_signals_csv(
    series: &BarSeries,
    output: &EngineOutput,
    config: &EngineConfig,
) -> Result<String> {
    if series.len() != output.len() {
        bail!(
            "output has {} records for {} bars",
            output.len(),
            series.len()
        );
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(signal_columns(config))?;

    for (i, (bar, r)) in series.bars().iter().zip(&output.records).enumerate() {
        let row = output.indicators.row(i);
        wtr.write_record([
            bar.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.4}", bar.open),
            format!("{:.4}", bar.high),
            format!("{:.4}", bar.low),
            format!("{:.4}", bar.close),
            bar.volume.to_string(),
            fmt_value(row.sma_short),
            fmt_value(row.sma_mid),
            fmt_value(row.sma_long),
            fmt_value(row.macd),
            fmt_value(row.macd_signal),
            fmt_value(row.rsi),
            fmt_flag(r.trend_long_ok).to_string(),
            fmt_flag(r.trend_short_ok).to_string(),
            fmt_flag(r.macd_up_ok).to_string(),
            fmt_flag(r.macd_down_ok).to_string(),
            fmt_flag(r.rsi_up_ok).to_string(),
            fmt_flag(r.rsi_down_ok).to_string(),
            fmt_flag(r.buy_signal).to_string(),
            fmt_flag(r.sell_signal).to_string(),
            r.signal.to_string(),
            fmt_flag(r.matches_criteria()).to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// `signals_{symbol}_{interval}_{mode}_{YYYYmmdd_HHMMSS}.csv`
pub fn signals_filename(
    symbol: &str,
    interval: &str,
    trend_mode: TrendMode,
    at: NaiveDateTime,
) -> String {
    format!(
        "signals_{symbol}_{interval}_{trend_mode}_{}.csv",
        at.format("%Y%m%d_%H%M%S")
    )
}

// ─── JSON manifest ──────────────────────────────────────────────────

/// Everything needed to identify and reproduce one exported run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub symbol: String,
    pub interval: String,
    pub generated_at: NaiveDateTime,
    pub csv_file: String,
    pub config: EngineConfig,
    pub fingerprint: RunFingerprint,
    pub summary: SignalSummary,
}

pub fn export_manifest_json(manifest: &RunManifest) -> Result<String> {
    serde_json::to_string_pretty(manifest).context("failed to serialize run manifest to JSON")
}

pub fn import_manifest_json(json: &str) -> Result<RunManifest> {
    let manifest: RunManifest =
        serde_json::from_str(json).context("failed to deserialize run manifest from JSON")?;
    if manifest.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            manifest.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(manifest)
}

// ─── Artifact files ─────────────────────────────────────────────────

/// Paths written by `save_run`.
#[derive(Debug, Clone)]
pub struct SavedRun {
    pub csv_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

/// Options naming the exported files.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub symbol: String,
    pub interval: String,
    pub generated_at: NaiveDateTime,
    pub write_manifest: bool,
}

/// Write the signals CSV (and optionally the manifest next to it) into
/// `output_dir`, creating the directory if needed.
pub fn save_run(
    output_dir: &Path,
    series: &BarSeries,
    output: &EngineOutput,
    config: &EngineConfig,
    summary: &SignalSummary,
    opts: &ExportOptions,
) -> Result<SavedRun> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let csv_name = signals_filename(&opts.symbol, &opts.interval, config.trend_mode, opts.generated_at);
    let csv_path = output_dir.join(&csv_name);
    let csv = export_signals_csv(series, output, config)?;
    std::fs::write(&csv_path, csv)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    let manifest_path = if opts.write_manifest {
        let manifest = RunManifest {
            schema_version: SCHEMA_VERSION,
            symbol: opts.symbol.clone(),
            interval: opts.interval.clone(),
            generated_at: opts.generated_at,
            csv_file: csv_name.clone(),
            config: config.clone(),
            fingerprint: RunFingerprint::new(config, series, &output.records)
                .context("failed to fingerprint run")?,
            summary: summary.clone(),
        };
        let path = csv_path.with_extension("json");
        std::fs::write(&path, export_manifest_json(&manifest)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    tracing::info!(path = %csv_path.display(), rows = series.len(), "signals exported");
    Ok(SavedRun {
        csv_path,
        manifest_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_core::indicators::IndicatorSet;
    use triad_core::{Bar, SignalRecord};

    fn ts(minute: i64) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
            + chrono::Duration::minutes(minute)
    }

    fn two_bar_run() -> (BarSeries, EngineOutput) {
        let bars = (0..2)
            .map(|i| Bar {
                timestamp: ts(15 * i),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.123456,
                volume: 1000,
            })
            .collect();
        let output = EngineOutput {
            indicators: IndicatorSet {
                sma_short: vec![None, Some(100.5)],
                sma_mid: vec![None, None],
                sma_long: vec![None, None],
                macd: vec![Some(-0.12346), Some(0.5)],
                macd_signal: vec![None, Some(0.25)],
                rsi: vec![None, Some(55.55557)],
            },
            records: vec![
                SignalRecord::hold(),
                SignalRecord::from_flags(true, false, true, false, true, false),
            ],
        };
        (BarSeries::new(bars).unwrap(), output)
    }

    #[test]
    fn csv_header_uses_configured_windows() {
        let cols = signal_columns(&EngineConfig::default());
        assert_eq!(cols.len(), 22);
        assert_eq!(&cols[6..9], &["sma_20", "sma_50", "sma_200"]);
        assert_eq!(cols.last().map(String::as_str), Some("matches_criteria"));
    }

    #[test]
    fn csv_rows_round_and_blank_undefined() {
        let (series, output) = two_bar_run();
        let csv = export_signals_csv(&series, &output, &EngineConfig::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024-01-02 09:30:00,100.0000,101.0000,99.0000,100.1235,1000,,,,-0.1235,,,\
             false,false,false,false,false,false,false,false,HOLD,false"
        );
        assert!(lines[2].ends_with("true,false,BUY,true"));
        assert!(lines[2].contains(",55.5556,"));
    }

    #[test]
    fn csv_rejects_misaligned_output() {
        let (series, mut output) = two_bar_run();
        output.records.pop();
        assert!(export_signals_csv(&series, &output, &EngineConfig::default()).is_err());
    }

    #[test]
    fn filename_pattern() {
        let name = signals_filename("SPY", "15m", TrendMode::Stacked, ts(0));
        assert_eq!(name, "signals_SPY_15m_stacked_20240102_093000.csv");
    }

    #[test]
    fn manifest_rejects_future_schema() {
        let (series, output) = two_bar_run();
        let config = EngineConfig::default();
        let manifest = RunManifest {
            schema_version: SCHEMA_VERSION + 1,
            symbol: "SPY".into(),
            interval: "15m".into(),
            generated_at: ts(0),
            csv_file: "x.csv".into(),
            fingerprint: RunFingerprint::new(&config, &series, &output.records).unwrap(),
            summary: SignalSummary::from_records(&output.records, &[], config.trend_mode),
            config,
        };
        let json = export_manifest_json(&manifest).unwrap();
        let err = import_manifest_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }
}
