//! Position-limit guard
//!
//! Validates the merged order set for one product before it leaves the
//! engine.
//!
//! ```text
//! strategies → merge → CapacityLedger clip → check_orders → TickOutput
//! ```
//!
//! Checks performed:
//! 1. **Size sign** - no zero-quantity orders
//! 2. **Buy capacity** - total buys never exceed `max(0, limit - position)`
//! 3. **Sell capacity** - total sells never exceed `max(0, limit + position)`

pub mod capacity;

pub use capacity::CapacityLedger;

use crate::core::{InvariantViolation, Order, Product, Side};

/// Buy capacity left at `position` under a symmetric `limit`
#[inline]
pub fn buy_capacity(position: i64, limit: i64) -> i64 {
    (limit - position).max(0)
}

/// Sell capacity left at `position` under a symmetric `limit`
#[inline]
pub fn sell_capacity(position: i64, limit: i64) -> i64 {
    (limit + position).max(0)
}

/// Validate every order emitted for `product` in one tick
///
/// Assumes every order fills, so the sums are worst-case exposure.
pub fn check_orders(
    product: Product,
    orders: &[Order],
    position: i64,
    limit: i64,
) -> Result<(), InvariantViolation> {
    let mut bought = 0;
    let mut sold = 0;

    for order in orders {
        if order.symbol != product {
            return Err(InvariantViolation::WrongProduct {
                expected: product,
                found: order.symbol,
            });
        }
        match order.side() {
            Some(Side::Buy) => bought += order.size(),
            Some(Side::Sell) => sold += order.size(),
            None => {
                return Err(InvariantViolation::ZeroQuantity {
                    product,
                    price: order.price,
                })
            }
        }
    }

    let buy_cap = buy_capacity(position, limit);
    if bought > buy_cap {
        return Err(InvariantViolation::LimitExceeded {
            product,
            side: Side::Buy,
            total: bought,
            capacity: buy_cap,
            position,
            limit,
        });
    }

    let sell_cap = sell_capacity(position, limit);
    if sold > sell_cap {
        return Err(InvariantViolation::LimitExceeded {
            product,
            side: Side::Sell,
            total: sold,
            capacity: sell_cap,
            position,
            limit,
        });
    }

    Ok(())
}
