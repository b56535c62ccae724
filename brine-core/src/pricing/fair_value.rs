//! Fair value estimation
//!
//! Every mode is total: degenerate books resolve to a configured fallback
//! instead of an error, so each tick always has a reference price.

use crate::core::Product;
use crate::orderbook::{calculate_vwap, OrderDepth};
use serde::{Deserialize, Serialize};

/// Fixed-weight basket definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketRecipe {
    pub basket: Product,
    /// (component, units per basket)
    pub legs: &'static [(Product, f64)],
}

/// PICNIC_BASKET1 = 6 CROISSANT + 3 JAM + 1 DJEMBE
pub const PICNIC_BASKET1: BasketRecipe = BasketRecipe {
    basket: Product::PicnicBasket1,
    legs: &[
        (Product::Croissant, 6.0),
        (Product::Jam, 3.0),
        (Product::Djembe, 1.0),
    ],
};

/// PICNIC_BASKET2 = 4 CROISSANT + 2 JAM
pub const PICNIC_BASKET2: BasketRecipe = BasketRecipe {
    basket: Product::PicnicBasket2,
    legs: &[(Product::Croissant, 4.0), (Product::Jam, 2.0)],
};

/// Recipe for a basket product
pub fn recipe_for(product: Product) -> Option<&'static BasketRecipe> {
    match product {
        Product::PicnicBasket1 => Some(&PICNIC_BASKET1),
        Product::PicnicBasket2 => Some(&PICNIC_BASKET2),
        _ => None,
    }
}

impl BasketRecipe {
    /// Model-implied basket value from component values
    ///
    /// `component_value` is asked once per leg.
    pub fn synthetic_value<F>(&self, mut component_value: F) -> f64
    where
        F: FnMut(Product) -> f64,
    {
        self.legs
            .iter()
            .map(|(product, weight)| weight * component_value(*product))
            .sum()
    }
}

/// How a product's fair value is derived from its book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FairValueMode {
    /// Constant fair value
    Fixed { value: f64 },
    /// Average of the per-side volume-weighted prices
    VolumeWeighted { fallback: f64 },
    /// `(best_ask + best_bid) / 2`
    Mid { fallback: f64 },
    /// Linear combination of component fair values
    Synthetic { basket: Product },
}

/// Fair value of a single book under a non-synthetic mode
///
/// Synthetic baskets need the component values and go through
/// [`synthetic_fair_value`]; passing one here returns `None`.
pub fn fair_value(depth: &OrderDepth, mode: FairValueMode) -> Option<f64> {
    match mode {
        FairValueMode::Fixed { value } => Some(value),
        FairValueMode::VolumeWeighted { fallback } => {
            Some(volume_weighted_fair_value(depth).unwrap_or(fallback))
        }
        FairValueMode::Mid { fallback } => Some(mid_price(depth).unwrap_or(fallback)),
        FairValueMode::Synthetic { .. } => None,
    }
}

/// Synthetic basket value from component values
///
/// Returns `None` if `basket` is not a basket product.
pub fn synthetic_fair_value<F>(basket: Product, component_value: F) -> Option<f64>
where
    F: FnMut(Product) -> f64,
{
    recipe_for(basket).map(|recipe| recipe.synthetic_value(component_value))
}

/// Volume-weighted fair value, `None` when either side is empty or has zero volume
#[inline]
pub fn volume_weighted_fair_value(depth: &OrderDepth) -> Option<f64> {
    if !depth.is_two_sided() {
        return None;
    }

    let ask_vwap = calculate_vwap(&depth.sell_orders)?;
    let bid_vwap = calculate_vwap(&depth.buy_orders)?;
    Some((ask_vwap + bid_vwap) / 2.0)
}

/// Simple mid, `None` when either side is empty
#[inline]
pub fn mid_price(depth: &OrderDepth) -> Option<f64> {
    let best_ask = depth.best_ask()?;
    let best_bid = depth.best_bid()?;
    Some((best_ask + best_bid) as f64 / 2.0)
}
