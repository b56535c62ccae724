//! Inventory clearing at fair
//!
//! After taking, any residual inventory is offered back at the integer
//! price nearest fair on the flattening side, but only if that exact price
//! is resting in the book. Clearing never grows the exposure it works on.

use brine_core::orderbook::OrderDepth;
use brine_core::{Order, Product};

/// Volume committed on each side so far this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickVolumes {
    pub bought: i64,
    pub sold: i64,
}

impl TickVolumes {
    pub const fn new(bought: i64, sold: i64) -> Self {
        Self { bought, sold }
    }

    /// Position if every committed order fills
    #[inline]
    pub const fn position_after(&self, position: i64) -> i64 {
        position + self.bought - self.sold
    }

    /// Buy size still allowed under `limit`
    #[inline]
    pub const fn buy_capacity(&self, position: i64, limit: i64) -> i64 {
        limit - (position + self.bought)
    }

    /// Sell size still allowed under `limit`
    #[inline]
    pub const fn sell_capacity(&self, position: i64, limit: i64) -> i64 {
        limit + (position - self.sold)
    }
}

/// Flatten residual inventory against a resting level at fair
///
/// Long after taking: sell into a bid resting at `ceil(fair)`.
/// Short after taking: buy from an ask resting at `floor(fair)`.
/// Appends at most one order and returns the updated volumes.
pub fn clear_position(
    orders: &mut Vec<Order>,
    depth: &OrderDepth,
    product: Product,
    position: i64,
    limit: i64,
    volumes: TickVolumes,
    fair_value: f64,
) -> TickVolumes {
    let position_after = volumes.position_after(position);
    let mut volumes = volumes;

    if position_after > 0 {
        let fair_ask = fair_value.ceil() as i64;
        let clear_qty = depth.bid_volume_at(fair_ask).min(position_after);
        let qty = clear_qty.min(volumes.sell_capacity(position, limit));
        if qty > 0 {
            orders.push(Order::sell(product, fair_ask, qty));
            volumes.sold += qty;
        }
    } else if position_after < 0 {
        let fair_bid = fair_value.floor() as i64;
        let clear_qty = depth.ask_volume_at(fair_bid).min(position_after.abs());
        let qty = clear_qty.min(volumes.buy_capacity(position, limit));
        if qty > 0 {
            orders.push(Order::buy(product, fair_bid, qty));
            volumes.bought += qty;
        }
    }

    volumes
}
