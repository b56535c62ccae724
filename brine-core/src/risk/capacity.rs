//! Remaining per-side capacity for one product within a tick

use super::{buy_capacity, sell_capacity};
use crate::core::{Order, Side};

/// Tracks how much of a product's buy and sell capacity is already used
///
/// Seeded from the orders already emitted this tick; later orders are
/// clipped so the merged set stays inside the position limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLedger {
    buy_remaining: i64,
    sell_remaining: i64,
}

impl CapacityLedger {
    pub fn new(position: i64, limit: i64) -> Self {
        Self {
            buy_remaining: buy_capacity(position, limit),
            sell_remaining: sell_capacity(position, limit),
        }
    }

    /// Ledger with `orders` already booked
    pub fn with_orders(position: i64, limit: i64, orders: &[Order]) -> Self {
        let mut ledger = Self::new(position, limit);
        for order in orders {
            ledger.book(order.quantity);
        }
        ledger
    }

    #[inline]
    pub fn buy_remaining(&self) -> i64 {
        self.buy_remaining
    }

    #[inline]
    pub fn sell_remaining(&self) -> i64 {
        self.sell_remaining
    }

    fn book(&mut self, quantity: i64) {
        if quantity > 0 {
            self.buy_remaining = (self.buy_remaining - quantity).max(0);
        } else if quantity < 0 {
            self.sell_remaining = (self.sell_remaining + quantity).max(0);
        }
    }

    /// Clip `order` to the remaining capacity on its side and book it
    ///
    /// Returns `None` when nothing is left on that side.
    pub fn clip(&mut self, order: Order) -> Option<Order> {
        let side = order.side()?;
        let remaining = match side {
            Side::Buy => self.buy_remaining,
            Side::Sell => self.sell_remaining,
        };

        let size = order.size().min(remaining);
        if size <= 0 {
            return None;
        }

        let clipped = match side {
            Side::Buy => Order::buy(order.symbol, order.price, size),
            Side::Sell => Order::sell(order.symbol, order.price, size),
        };
        self.book(clipped.quantity);
        Some(clipped)
    }
}
