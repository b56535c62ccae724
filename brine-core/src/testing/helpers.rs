//! Builders and assertions for engine tests

use crate::config::EngineConfig;
use crate::core::{Order, Product};
use crate::data::{TickOutput, TradingState};
use crate::orderbook::OrderDepth;

/// Book from (price, size) levels; ask sizes are given positive
pub fn book(bids: &[(i64, i64)], asks: &[(i64, i64)]) -> OrderDepth {
    OrderDepth {
        buy_orders: bids.iter().copied().collect(),
        sell_orders: asks.iter().map(|(price, size)| (*price, -size.abs())).collect(),
    }
}

/// One-level book straddling `mid` by `half_spread`
pub fn touch_book(mid: i64, half_spread: i64, size: i64) -> OrderDepth {
    book(&[(mid - half_spread, size)], &[(mid + half_spread, size)])
}

/// Fluent builder for a tick
#[derive(Debug, Clone, Default)]
pub struct StateBuilder {
    state: TradingState,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.state.timestamp = timestamp;
        self
    }

    pub fn book(mut self, product: Product, depth: OrderDepth) -> Self {
        self.state.order_depths.insert(product, depth);
        self
    }

    pub fn position(mut self, product: Product, quantity: i64) -> Self {
        self.state.position.insert(product, quantity);
        self
    }

    pub fn trader_data(mut self, blob: impl Into<String>) -> Self {
        self.state.trader_data = blob.into();
        self
    }

    pub fn build(self) -> TradingState {
        self.state
    }
}

/// A tick with a two-sided book for every product at typical levels
pub fn full_market_state(timestamp: i64) -> TradingState {
    StateBuilder::new()
        .timestamp(timestamp)
        .book(Product::RainforestResin, touch_book(10_000, 2, 20))
        .book(Product::Kelp, touch_book(2_000, 1, 15))
        .book(Product::SquidInk, touch_book(1_900, 1, 15))
        .book(Product::Croissant, touch_book(4_300, 1, 50))
        .book(Product::Jam, touch_book(6_600, 1, 50))
        .book(Product::Djembe, touch_book(13_400, 1, 20))
        .book(Product::PicnicBasket1, touch_book(59_200, 5, 10))
        .book(Product::PicnicBasket2, touch_book(30_400, 5, 10))
        .build()
}

/// (total bought, total sold) over a product's orders
pub fn side_totals(orders: &[Order]) -> (i64, i64) {
    orders.iter().fold((0, 0), |(bought, sold), order| {
        if order.quantity > 0 {
            (bought + order.quantity, sold)
        } else {
            (bought, sold - order.quantity)
        }
    })
}

/// Panic if any product's emitted orders could breach its limit
pub fn assert_within_limits(output: &TickOutput, state: &TradingState, config: &EngineConfig) {
    for (product, orders) in &output.orders {
        let position = state.position_of(*product);
        let limit = config.limits.limit(*product);
        let (bought, sold) = side_totals(orders);

        assert!(
            bought <= (limit - position).max(0),
            "{} buys {} at position {} (limit {})",
            product,
            bought,
            position,
            limit
        );
        assert!(
            sold <= (limit + position).max(0),
            "{} sells {} at position {} (limit {})",
            product,
            sold,
            position,
            limit
        );
        assert!(
            orders.iter().all(|o| o.quantity != 0),
            "{} has a zero-quantity order",
            product
        );
    }
}
