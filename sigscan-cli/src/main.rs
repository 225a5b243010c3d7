//! SigScan CLI: run a scan over a data directory or synthetic data.
//!
//! Commands:
//! - `scan` - load a market snapshot, run one scan, emit the result as JSON
//! - `config` - print the default engine config (or universe) as TOML
//!
//! The JSON result goes to stdout (or `--output`); logs and the summary go
//! to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sigscan_core::EngineConfig;
use sigscan_runner::{load_snapshot_dir, synthetic_snapshot, ScanResult, Scanner, Universe};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sigscan",
    version,
    about = "SigScan CLI - market-structure signal scanner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scan and emit the ranked result as JSON.
    Scan {
        /// Directory with <SYMBOL>.csv files and optional tickers.json / freshness.json.
        #[arg(long, conflicts_with = "synthetic")]
        data_dir: Option<PathBuf>,

        /// Scan deterministic synthetic data instead of a data directory.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Bars per symbol for synthetic data.
        #[arg(long, default_value_t = 300)]
        bars: usize,

        /// Master seed for synthetic data.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Universe TOML file. Defaults to the built-in crypto universe.
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Engine config TOML file. Defaults to built-in parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the default engine config as TOML.
    Config {
        /// Print the default universe instead.
        #[arg(long, default_value_t = false)]
        universe: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            data_dir,
            synthetic,
            bars,
            seed,
            universe,
            config,
            output,
            pretty,
        } => run_scan(ScanArgs {
            data_dir,
            synthetic,
            bars,
            seed,
            universe,
            config,
            output,
            pretty,
        }),
        Commands::Config { universe } => run_config(universe),
    }
}

struct ScanArgs {
    data_dir: Option<PathBuf>,
    synthetic: bool,
    bars: usize,
    seed: u64,
    universe: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let universe = match &args.universe {
        Some(path) => Universe::from_file(path)
            .with_context(|| format!("load universe {}", path.display()))?,
        None => Universe::default_crypto(),
    };

    let snapshot = match (&args.data_dir, args.synthetic) {
        (Some(dir), false) => load_snapshot_dir(dir, &universe)
            .with_context(|| format!("load snapshot from {}", dir.display()))?,
        (None, true) => {
            info!(bars = args.bars, seed = args.seed, "using synthetic data");
            synthetic_snapshot(&universe, args.bars, args.seed)
        }
        _ => bail!("one of --data-dir or --synthetic is required"),
    };

    let scanner = Scanner::new(config).context("invalid engine config")?;
    let result = scanner.scan(&universe, &snapshot);
    print_summary(&result);

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "result written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_config(universe: bool) -> Result<()> {
    let text = if universe {
        Universe::default_crypto().to_toml()?
    } else {
        EngineConfig::default().to_toml()?
    };
    print!("{text}");
    Ok(())
}

fn print_summary(result: &ScanResult) {
    eprintln!(
        "{} at {}: {} signals ({} tradable), {} filtered, data {:?}",
        result.scan_id,
        result.scan_time.format("%Y-%m-%d %H:%M:%S UTC"),
        result.total_signals,
        result.tradable().count(),
        result.filtered.len(),
        result.data_health.status,
    );
    for s in result.signals.iter().take(10) {
        eprintln!(
            "  {:<10} {:<5} {:>3} {:?}  entry {:>14.6} ({})  stop {:>14.6}  rr {:.2}  {:?}",
            s.symbol,
            s.direction.as_str(),
            s.confidence_score,
            s.rating,
            s.entry_price,
            s.entry_type,
            s.stop_price,
            s.reward_risk_ratio,
            s.status,
        );
    }
    for f in &result.filtered {
        eprintln!("  {:<10} filtered: {}", f.symbol, f.reason);
    }
}
