//! Triad CLI: run the SMA / MACD / RSI signal engine over a CSV of bars.
//!
//! Commands:
//! - `run`: load bars, evaluate signals, print a summary, export CSV / JSON
//! - `config`: print the default engine configuration as TOML

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use triad_cli::export::{save_run, ExportOptions};
use triad_cli::loader::load_bars_csv;
use triad_core::signals::validate_records;
use triad_core::{EngineConfig, RsiMethod, SignalEngine, SignalSummary, TrendMode};

#[derive(Parser)]
#[command(name = "triad", about = "Triad: SMA / MACD / RSI signal engine")]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate signals for a CSV of OHLCV bars.
    Run {
        /// CSV with header timestamp,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML engine config. Defaults apply for missing fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the trend mode: pullback or stacked.
        #[arg(long)]
        trend_mode: Option<TrendMode>,

        /// Override the RSI averaging method: wilder or simple.
        #[arg(long)]
        rsi_method: Option<RsiMethod>,

        /// Output directory for the signals CSV.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Symbol used in output file names.
        #[arg(long, default_value = "SPY")]
        symbol: String,

        /// Bar interval used in output file names.
        #[arg(long, default_value = "15m")]
        interval: String,

        /// Also write a JSON run manifest next to the CSV.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Run even when the series is shorter than the longest indicator window.
        #[arg(long, default_value_t = false)]
        allow_partial: bool,
    },
    /// Print the default engine configuration as TOML.
    Config,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Run {
            input,
            config,
            trend_mode,
            rsi_method,
            output_dir,
            symbol,
            interval,
            json,
            allow_partial,
        } => run_cmd(RunArgs {
            input,
            config,
            trend_mode,
            rsi_method,
            output_dir,
            symbol,
            interval,
            json,
            allow_partial,
        }),
        Commands::Config => {
            print!("{}", EngineConfig::default().to_toml()?);
            Ok(())
        }
    }
}

struct RunArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    trend_mode: Option<TrendMode>,
    rsi_method: Option<RsiMethod>,
    output_dir: PathBuf,
    symbol: String,
    interval: String,
    json: bool,
    allow_partial: bool,
}

fn run_cmd(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(mode) = args.trend_mode {
        config = config.with_trend_mode(mode);
    }
    if let Some(method) = args.rsi_method {
        config = config.with_rsi_method(method);
    }

    let series = load_bars_csv(&args.input)?;
    let engine = SignalEngine::new(config)?;

    let output = if args.allow_partial {
        engine.run_partial(&series)
    } else {
        engine
            .run(&series)
            .context("use --allow-partial to run on a short series")?
    };
    validate_records(&output.records)?;

    let summary = engine.summarize(&series, &output);
    print_summary(&args.symbol, &args.interval, engine.config(), &summary, output.first_complete_index());

    let saved = save_run(
        &args.output_dir,
        &series,
        &output,
        engine.config(),
        &summary,
        &ExportOptions {
            symbol: args.symbol.clone(),
            interval: args.interval.clone(),
            generated_at: chrono::Local::now().naive_local(),
            write_manifest: args.json,
        },
    )?;

    println!("Signals saved to: {}", saved.csv_path.display());
    if let Some(path) = saved.manifest_path {
        println!("Manifest saved to: {}", path.display());
    }
    Ok(())
}

fn print_summary(
    symbol: &str,
    interval: &str,
    config: &EngineConfig,
    summary: &SignalSummary,
    first_complete: Option<usize>,
) {
    let fmt_time = |t: Option<chrono::NaiveDateTime>| {
        t.map(|t| t.to_string()).unwrap_or_else(|| "-".into())
    };

    println!();
    println!("=== Signal Summary ===");
    println!("Symbol:         {symbol} ({interval})");
    println!("Trend mode:     {}", config.trend_mode);
    println!("RSI method:     {}", config.rsi.method);
    println!(
        "Windows:        SMA {}/{}/{}, MACD {}/{}/{}, RSI {}",
        config.sma.short,
        config.sma.mid,
        config.sma.long,
        config.macd.fast,
        config.macd.slow,
        config.macd.signal,
        config.rsi.period
    );
    println!("Bars:           {}", summary.total_bars);
    match first_complete {
        Some(i) => println!("Valid from bar: {i}"),
        None => println!("Valid from bar: - (series shorter than warm-up)"),
    }
    println!();
    println!("{:<15} {:>8} {:>9}", "Signal", "Count", "Rate");
    println!("{}", "-".repeat(34));
    println!("{:<15} {:>8} {:>8.2}%", "BUY", summary.buy_signals, summary.buy_frequency_pct);
    println!("{:<15} {:>8} {:>8.2}%", "SELL", summary.sell_signals, summary.sell_frequency_pct);
    println!("{:<15} {:>8}", "HOLD", summary.hold_signals);
    println!("{:<15} {:>8} {:>8.2}%", "BUY + SELL", summary.total_signals(), summary.signal_rate_pct);
    println!();
    println!("First signal:   {}", fmt_time(summary.first_signal_time));
    println!("Last signal:    {}", fmt_time(summary.last_signal_time));
    println!();
}
