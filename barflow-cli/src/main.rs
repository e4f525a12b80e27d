//! BarFlow CLI — replay and inspect commands for the historical feed.
//!
//! Commands:
//! - `replay` — construct a feed and drive it to exhaustion, reporting
//!   steps taken and per-symbol history
//! - `inspect` — load and align only, reporting the canonical index span
//!   and dataset hash without stepping
//!
//! This binary is the "simulation driver" collaborator: it owns the event
//! queue and the stepping loop; the feed only reveals bars.

use anyhow::{bail, Context, Result};
use barflow_core::events::EventQueue;
use barflow_core::{BarField, DataFeed, Event, FeedConfig, HistoricCsvFeed, SyntheticFeed};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barflow", about = "BarFlow — historical market-data feed")]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "barflow_core=debug".
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a feed to exhaustion and report the replay summary.
    Replay {
        /// Path to a TOML feed config (data_dir + symbols).
        #[arg(long, conflicts_with_all = ["data_dir", "symbols"])]
        config: Option<PathBuf>,

        /// Directory holding one <symbol>.csv per symbol.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Symbols to register, in stepping order.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Replay deterministic synthetic bars instead of files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Synthetic range start (YYYY-MM-DD).
        #[arg(long, default_value = "2020-01-01")]
        start: String,

        /// Synthetic range end (YYYY-MM-DD).
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Lookback window reported per symbol.
        #[arg(long, default_value_t = 5)]
        lookback: usize,
    },
    /// Load and align without stepping; report what the feed would see.
    Inspect {
        /// Path to a TOML feed config (data_dir + symbols).
        #[arg(long, conflicts_with_all = ["data_dir", "symbols"])]
        config: Option<PathBuf>,

        /// Directory holding one <symbol>.csv per symbol.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Symbols to register.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match cli.command {
        Commands::Replay {
            config,
            data_dir,
            symbols,
            synthetic,
            start,
            end,
            lookback,
        } => {
            if synthetic {
                let symbols = if symbols.is_empty() {
                    vec!["SPY".to_string(), "QQQ".to_string()]
                } else {
                    symbols
                };
                let start = parse_date(&start)?;
                let end = parse_date(&end)?;
                let mut feed = SyntheticFeed::new(&symbols, start, end)
                    .context("failed to build synthetic feed")?;
                println!(
                    "replaying synthetic bars for {} symbol(s), {} slots",
                    symbols.len(),
                    feed.canonical_index().len()
                );
                replay(&mut feed, lookback)
            } else {
                let config = resolve_config(config, data_dir, symbols)?;
                let mut feed =
                    HistoricCsvFeed::new(&config).context("failed to build historic feed")?;
                println!(
                    "replaying {} symbol(s) from {} ({} slots, dataset {})",
                    config.symbols.len(),
                    config.data_dir.display(),
                    feed.canonical_index().len(),
                    &feed.dataset_hash()[..12]
                );
                replay(&mut feed, lookback)
            }
        }
        Commands::Inspect {
            config,
            data_dir,
            symbols,
        } => {
            let config = resolve_config(config, data_dir, symbols)?;
            let feed = HistoricCsvFeed::new(&config).context("load/align failed")?;

            let index = feed.canonical_index();
            println!("dataset      {}", feed.dataset_hash());
            println!("symbols      {}", feed.symbols().join(", "));
            println!("slots        {}", index.len());
            if let (Some(first), Some(last)) = (index.first(), index.last()) {
                println!("span         {first} .. {last}");
            }
            Ok(())
        }
    }
}

/// Step the feed to exhaustion, consuming the queue like a simulator would,
/// then print the per-symbol summary.
fn replay(feed: &mut dyn DataFeed, lookback: usize) -> Result<()> {
    let mut queue = EventQueue::new();
    let mut steps = 0usize;

    while feed.is_streaming() {
        feed.advance(&mut queue);
        while let Some(event) = queue.next_event() {
            match event {
                Event::Market => steps += 1,
                _ => {}
            }
        }
    }

    println!("replay complete: {steps} market event(s)");
    for symbol in feed.symbols().to_vec() {
        let bars = feed.latest_bars(&symbol, usize::MAX)?.len();
        let last = feed.latest_timestamp(&symbol)?;
        let closes = feed.latest_values(&symbol, BarField::Close, lookback)?;
        let tail: Vec<String> = closes.iter().map(|c| format!("{c:.2}")).collect();
        println!("  {symbol:<8} {bars} bars, last {last}, closes [{}]", tail.join(", "));
    }
    Ok(())
}

fn resolve_config(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    symbols: Vec<String>,
) -> Result<FeedConfig> {
    if let Some(path) = config {
        return FeedConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    let Some(data_dir) = data_dir else {
        bail!("either --config or --data-dir with --symbols is required");
    };
    if symbols.is_empty() {
        bail!("--symbols is required with --data-dir");
    }
    Ok(FeedConfig::new(data_dir, symbols)?)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn init_logging(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let env_filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
