//! Test helpers for unit, integration and bench code
//!
//! Provides builders for:
//! - OrderDepth books from (price, size) levels
//! - TradingState ticks with books, positions and a traderData blob
//! - Side totals and limit assertions over emitted orders

pub mod helpers;

pub use helpers::*;
