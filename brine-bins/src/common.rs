//! Common utilities for all binaries
//!
//! Shared initialization, CLI parsing, and reporting code.

use anyhow::Result;
use brine_core::utils::init_logger;
use brine_strategies::TraderStats;
use clap::Args;

/// Common CLI arguments for all binaries
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Log level (overridden by RUST_LOG)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Engine config file (JSON); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

/// Initialize tracing/logging
pub fn init_logging(args: &CommonArgs) -> Result<()> {
    init_logger(&args.log_level, args.json_logs)
}

/// Print final statistics
pub fn print_stats(stats: &TraderStats) {
    tracing::info!("=== Final Statistics ===");
    tracing::info!("Ticks processed: {}", stats.ticks);
    tracing::info!("Orders emitted: {}", stats.orders_emitted);
    tracing::info!("Relative-value orders: {}", stats.relative_value_orders);
    tracing::info!("Suppressed products: {}", stats.suppressed_products);
    tracing::info!("History restores: {}", stats.history_restores);

    if stats.ticks > 0 {
        let per_tick = stats.orders_emitted as f64 / stats.ticks as f64;
        tracing::info!("Orders per tick: {:.2}", per_tick);
    }
}
