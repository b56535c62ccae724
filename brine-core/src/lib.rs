//! Brine Core - per-tick decision engine building blocks
//!
//! Brine turns one market snapshot per tick into bounded order intents for a
//! fixed universe of eight instruments: two market-made products, one
//! mean-reverting product, three basket components and two fixed-weight
//! baskets of those components.
//!
//! ## Architecture
//! - **Synchronous**, single-threaded, bounded work per tick
//! - **Total** fair-value functions: degenerate books fall back, never error
//! - **Policy table** built once from config, read every tick
//! - **Invariant guard** on every product's merged orders
//!
//! ## Core Modules
//! - `core`: Product universe, orders and error types
//! - `orderbook`: Read-only per-product book view
//! - `data`: Tick input and output
//! - `pricing`: Fair value modes and basket recipes
//! - `history`: Bounded rolling windows and the `traderData` codec
//! - `config`: Defaults, serde config types, loading and validation
//! - `policy`: Product -> (fair value mode, execution policy)
//! - `risk`: Position-limit guard and capacity clipping
//! - `utils`: Logging setup
//!
//! Strategies and the trader live in `brine-strategies`.

pub mod config;
pub mod core;
pub mod data;
pub mod history;
pub mod orderbook;
pub mod policy;
pub mod pricing;
pub mod risk;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::config::EngineConfig;
pub use crate::core::{ConfigError, HistoryError, InvariantViolation, Order, Product, Side};
pub use crate::data::{TickOutput, TradingState};
pub use crate::orderbook::OrderDepth;

// Re-export error types
pub use anyhow::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::{Order, Product, Side};
    pub use crate::data::{TickOutput, TradingState};
    pub use crate::history::{RollingHistory, RollingWindow, VwapSample};
    pub use crate::orderbook::OrderDepth;
    pub use crate::policy::{ExecutionPolicy, MakeStyle, PolicyTable, ProductPolicy, TakeParams};
    pub use crate::pricing::{fair_value, FairValueMode};

    pub use crate::{Error, Result};
}
