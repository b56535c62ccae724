//! Replay harness for the Brine trader
//!
//! Feeds ticks to the trader one at a time and writes each `TickOutput` as
//! a JSON line. Ticks come from a JSON-lines file or a seeded synthetic
//! market. When a tick carries no `traderData`, the previous tick's blob is
//! passed forward the way the exchange simulator does.

use anyhow::{bail, Context, Result};
use brine_bins::common::{init_logging, print_stats, CommonArgs};
use brine_bins::feed::{JsonLinesFeed, SyntheticFeed};
use brine_core::{EngineConfig, TradingState};
use brine_strategies::Trader;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct ReplayArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// JSON-lines file of trading states
    #[arg(short, long, conflicts_with = "synthetic")]
    input: Option<PathBuf>,

    /// Generate this many synthetic ticks instead of reading a file
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for the synthetic market
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rebuild empty history from traderData
    #[arg(long)]
    restore_history: bool,
}

fn main() -> Result<()> {
    let args = ReplayArgs::parse();

    init_logging(&args.common)?;

    tracing::info!("=== Brine: Replay ===");

    let mut config = match &args.common.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.restore_history {
        config.restore_history = true;
    }

    let mut trader = Trader::new(config)?;

    let ticks: Box<dyn Iterator<Item = Result<TradingState>>> = match (&args.input, args.synthetic)
    {
        (Some(path), _) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open tick file {}", path.display()))?;
            tracing::info!("Replaying {}", path.display());
            Box::new(JsonLinesFeed::new(BufReader::new(file)))
        }
        (None, Some(count)) => {
            tracing::info!("Synthetic market: {} ticks, seed {}", count, args.seed);
            Box::new(SyntheticFeed::new(count, args.seed).map(Ok))
        }
        (None, None) => bail!("Either --input or --synthetic is required"),
    };

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);

    let mut carried = String::new();
    for tick in ticks {
        let mut state = tick?;
        if state.trader_data.is_empty() {
            state.trader_data = std::mem::take(&mut carried);
        }

        let output = trader.run(&state);
        serde_json::to_writer(&mut writer, &output).context("Failed to write tick output")?;
        writer.write_all(b"\n")?;

        carried = output.trader_data;
    }
    writer.flush().context("Failed to flush output")?;

    print_stats(&trader.stats());

    Ok(())
}
