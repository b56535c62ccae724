//! Core value types shared by every strategy
//!
//! - `Product`: the closed instrument universe
//! - `Side`: buy or sell
//! - `Order`: a signed order intent (positive = buy, negative = sell)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tradable instrument
///
/// The universe is fixed at compile time. Serialized as the exchange symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "RAINFOREST_RESIN")]
    RainforestResin,
    #[serde(rename = "KELP")]
    Kelp,
    #[serde(rename = "SQUID_INK")]
    SquidInk,
    #[serde(rename = "CROISSANT")]
    Croissant,
    #[serde(rename = "JAM")]
    Jam,
    #[serde(rename = "DJEMBE")]
    Djembe,
    #[serde(rename = "PICNIC_BASKET1")]
    PicnicBasket1,
    #[serde(rename = "PICNIC_BASKET2")]
    PicnicBasket2,
}

impl Product {
    /// Every product, in a stable order
    pub const ALL: [Product; 8] = [
        Product::RainforestResin,
        Product::Kelp,
        Product::SquidInk,
        Product::Croissant,
        Product::Jam,
        Product::Djembe,
        Product::PicnicBasket1,
        Product::PicnicBasket2,
    ];

    /// Components of the picnic baskets
    pub const COMPONENTS: [Product; 3] = [Product::Croissant, Product::Jam, Product::Djembe];

    /// Exchange symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Product::RainforestResin => "RAINFOREST_RESIN",
            Product::Kelp => "KELP",
            Product::SquidInk => "SQUID_INK",
            Product::Croissant => "CROISSANT",
            Product::Jam => "JAM",
            Product::Djembe => "DJEMBE",
            Product::PicnicBasket1 => "PICNIC_BASKET1",
            Product::PicnicBasket2 => "PICNIC_BASKET2",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Order side (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order intent returned to the exchange
///
/// `quantity` is signed: positive buys, negative sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Product,
    pub price: i64,
    pub quantity: i64,
}

impl Order {
    #[inline]
    pub const fn new(symbol: Product, price: i64, quantity: i64) -> Self {
        Self {
            symbol,
            price,
            quantity,
        }
    }

    /// Buy `size` units (size must be positive)
    #[inline]
    pub const fn buy(symbol: Product, price: i64, size: i64) -> Self {
        Self::new(symbol, price, size)
    }

    /// Sell `size` units (size must be positive)
    #[inline]
    pub const fn sell(symbol: Product, price: i64, size: i64) -> Self {
        Self::new(symbol, price, -size)
    }

    /// Side implied by the quantity sign, `None` for a zero quantity
    #[inline]
    pub const fn side(&self) -> Option<Side> {
        if self.quantity > 0 {
            Some(Side::Buy)
        } else if self.quantity < 0 {
            Some(Side::Sell)
        } else {
            None
        }
    }

    /// Unsigned size
    #[inline]
    pub const fn size(&self) -> i64 {
        self.quantity.abs()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.symbol, self.quantity, self.price)
    }
}
