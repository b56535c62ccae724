//! Tick input/output records
//!
//! The simulator supplies a `TradingState` per tick and receives a
//! `TickOutput` back. Both are plain serde records so replay files can be
//! stored as JSON lines.

pub mod types;

pub use types::{TickOutput, TradingState};
