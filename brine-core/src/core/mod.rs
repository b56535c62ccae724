//! Core types for the decision engine
//!
//! - `Product`: the fixed instrument universe
//! - `Order`: signed order intents
//! - Error types for invariant violations, history blobs and configuration

pub mod errors;
pub mod types;

pub use errors::{ConfigError, HistoryError, InvariantViolation};
pub use types::{Order, Product, Side};
