//! Order depth snapshot for one product
//!
//! Resting buy quotes carry positive sizes, resting sell quotes carry
//! negative sizes (quantity offered). Prices are integer ticks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resting quotes for one product this tick
///
/// Zero-size entries are tolerated on input and ignored by every query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// price -> positive resting size
    #[serde(default)]
    pub buy_orders: BTreeMap<i64, i64>,
    /// price -> negative resting size
    #[serde(default)]
    pub sell_orders: BTreeMap<i64, i64>,
}

impl OrderDepth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest resting bid price
    #[inline]
    pub fn best_bid(&self) -> Option<i64> {
        self.buy_orders
            .iter()
            .rev()
            .find(|(_, size)| **size != 0)
            .map(|(price, _)| *price)
    }

    /// Lowest resting ask price
    #[inline]
    pub fn best_ask(&self) -> Option<i64> {
        self.sell_orders
            .iter()
            .find(|(_, size)| **size != 0)
            .map(|(price, _)| *price)
    }

    /// Size resting at the best bid (positive)
    #[inline]
    pub fn best_bid_volume(&self) -> Option<i64> {
        self.best_bid().map(|p| self.bid_volume_at(p))
    }

    /// Size offered at the best ask (positive)
    #[inline]
    pub fn best_ask_volume(&self) -> Option<i64> {
        self.best_ask().map(|p| self.ask_volume_at(p))
    }

    /// Positive size resting on the bid at `price`, 0 if none
    #[inline]
    pub fn bid_volume_at(&self, price: i64) -> i64 {
        self.buy_orders.get(&price).map_or(0, |s| s.abs())
    }

    /// Positive size offered at `price`, 0 if none
    #[inline]
    pub fn ask_volume_at(&self, price: i64) -> i64 {
        self.sell_orders.get(&price).map_or(0, |s| s.abs())
    }

    #[inline]
    pub fn has_bids(&self) -> bool {
        self.best_bid().is_some()
    }

    #[inline]
    pub fn has_asks(&self) -> bool {
        self.best_ask().is_some()
    }

    /// Both sides populated
    #[inline]
    pub fn is_two_sided(&self) -> bool {
        self.has_bids() && self.has_asks()
    }

    /// Ask prices strictly above `threshold`, ascending
    pub fn asks_above(&self, threshold: f64) -> impl Iterator<Item = i64> + '_ {
        self.sell_orders
            .iter()
            .filter(move |(price, size)| **size != 0 && **price as f64 > threshold)
            .map(|(price, _)| *price)
    }

    /// Bid prices strictly below `threshold`, descending
    pub fn bids_below(&self, threshold: f64) -> impl Iterator<Item = i64> + '_ {
        self.buy_orders
            .iter()
            .rev()
            .filter(move |(price, size)| **size != 0 && (**price as f64) < threshold)
            .map(|(price, _)| *price)
    }
}

/// Volume-weighted average price over one side of the book
///
/// Sizes are taken in absolute value, so this works for either side.
///
/// # Returns
/// * `Some(vwap)` - Weighted average price
/// * `None` - If the side is empty or its total volume is zero
#[inline]
pub fn calculate_vwap(levels: &BTreeMap<i64, i64>) -> Option<f64> {
    let mut total_value = 0.0_f64;
    let mut total_size = 0_i64;

    for (price, size) in levels {
        let size = size.abs();
        total_value += *price as f64 * size as f64;
        total_size += size;
    }

    if total_size == 0 {
        return None;
    }

    Some(total_value / total_size as f64)
}

/// Top-of-book VWAP sample for a two-sided book
///
/// Each touch price is weighted by the size on the *opposite* touch:
/// `(bid * ask_size + ask * bid_size) / (ask_size + bid_size)`.
///
/// Returns `(volume, vwap)` or `None` for a one-sided book.
pub fn touch_vwap(depth: &OrderDepth) -> Option<(i64, f64)> {
    let best_bid = depth.best_bid()?;
    let best_ask = depth.best_ask()?;
    let bid_size = depth.bid_volume_at(best_bid);
    let ask_size = depth.ask_volume_at(best_ask);

    let volume = bid_size + ask_size;
    if volume == 0 {
        return None;
    }

    let vwap = (best_bid as f64 * ask_size as f64 + best_ask as f64 * bid_size as f64)
        / volume as f64;
    Some((volume, vwap))
}
