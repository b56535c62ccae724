//! Per-tick input and output records exchanged with the market simulator

use crate::core::{Order, Product};
use crate::orderbook::OrderDepth;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Market state handed to the engine once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    /// Simulator timestamp (opaque to the engine)
    #[serde(default)]
    pub timestamp: i64,

    /// Order depth per product; absent products have no book this tick
    #[serde(default)]
    pub order_depths: HashMap<Product, OrderDepth>,

    /// Signed inventory per product; absent means flat
    #[serde(default)]
    pub position: HashMap<Product, i64>,

    /// Opaque blob returned by the previous tick
    #[serde(default, rename = "traderData")]
    pub trader_data: String,
}

impl TradingState {
    /// Current position, defaulting to 0
    #[inline]
    pub fn position_of(&self, product: Product) -> i64 {
        self.position.get(&product).copied().unwrap_or(0)
    }

    #[inline]
    pub fn depth(&self, product: Product) -> Option<&OrderDepth> {
        self.order_depths.get(&product)
    }

    /// All of `products` have a book this tick
    pub fn has_depths(&self, products: &[Product]) -> bool {
        products.iter().all(|p| self.order_depths.contains_key(p))
    }
}

/// Engine decision for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// Order intents per product, in emission order
    pub orders: BTreeMap<Product, Vec<Order>>,

    /// Conversion request forwarded to the exchange
    pub conversions: i64,

    /// Serialized rolling history for the next tick
    #[serde(rename = "traderData")]
    pub trader_data: String,
}

impl TickOutput {
    /// Orders for one product (empty slice if none)
    pub fn orders_for(&self, product: Product) -> &[Order] {
        self.orders.get(&product).map_or(&[], Vec::as_slice)
    }

    /// Total number of order intents across products
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}
