//! Per-product order depth snapshots and depth analytics

pub mod depth;

pub use depth::{calculate_vwap, touch_vwap, OrderDepth};
