//! Basket relative-value allocation
//!
//! Compares each basket's fair value with the synthetic value of its
//! components and targets a full-limit position in the direction of the
//! mispricing:
//!
//! ```text
//! mids -> AdvantageVector -> AllocationSolver -> Allocation -> decompose -> orders
//! ```
//!
//! The objective `max Σ advantage_i * q_i` subject to `|q_i| <= limit_i` is
//! separable, so sign inspection solves it exactly. Coupled constraints would
//! need a real LP behind [`AllocationSolver`].

use brine_core::config::PositionLimits;
use brine_core::data::TradingState;
use brine_core::pricing::recipe_for;
use brine_core::{Order, Product};
use std::collections::BTreeMap;

/// Products in the solve, in vector order
pub const RELATIVE_VALUE_PRODUCTS: [Product; 5] = [
    Product::Croissant,
    Product::Jam,
    Product::Djembe,
    Product::PicnicBasket1,
    Product::PicnicBasket2,
];

/// Fair value per product
pub type PriceMap = BTreeMap<Product, f64>;

/// Target position per product
pub type Allocation = BTreeMap<Product, i64>;

/// Per-product mispricing against the component model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvantageVector {
    entries: [(Product, f64); 5],
}

impl AdvantageVector {
    /// Advantages from a complete price map, `None` if a product is missing
    ///
    /// Components are their own model, so their advantage is always zero.
    pub fn compute(prices: &PriceMap) -> Option<Self> {
        let mut entries = [(Product::Croissant, 0.0); 5];

        for (slot, product) in entries.iter_mut().zip(RELATIVE_VALUE_PRODUCTS) {
            let fair_value = *prices.get(&product)?;
            let model_value = match recipe_for(product) {
                Some(recipe) => {
                    if !recipe.legs.iter().all(|(leg, _)| prices.contains_key(leg)) {
                        return None;
                    }
                    recipe.synthetic_value(|leg| prices.get(&leg).copied().unwrap_or_default())
                }
                None => fair_value,
            };
            *slot = (product, fair_value - model_value);
        }

        Some(Self { entries })
    }

    pub fn get(&self, product: Product) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| *p == product)
            .map(|(_, adv)| *adv)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Product, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Maps advantages to target positions within limits
pub trait AllocationSolver {
    fn allocate(&self, advantages: &AdvantageVector, limits: &PositionLimits) -> Allocation;
}

/// Full limit long on positive advantage, full short on negative, flat on zero
#[derive(Debug, Clone, Copy, Default)]
pub struct SignInspection;

impl AllocationSolver for SignInspection {
    fn allocate(&self, advantages: &AdvantageVector, limits: &PositionLimits) -> Allocation {
        advantages
            .iter()
            .map(|(product, adv)| {
                let limit = limits.limit(product);
                let target = if adv > 0.0 {
                    limit
                } else if adv < 0.0 {
                    -limit
                } else {
                    0
                };
                (product, target)
            })
            .collect()
    }
}

/// Result of one solve
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeValueSolution {
    pub advantages: AdvantageVector,
    pub allocation: Allocation,
    /// `Σ advantage * target`
    pub estimated_profit: f64,
}

/// Advantage computation plus a pluggable allocation step
#[derive(Debug, Clone, Default)]
pub struct RelativeValueSolver<S = SignInspection> {
    solver: S,
}

impl RelativeValueSolver<SignInspection> {
    pub fn new() -> Self {
        Self::with_solver(SignInspection)
    }
}

impl<S: AllocationSolver> RelativeValueSolver<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Solve for target positions; `None` if `prices` is incomplete
    pub fn solve(
        &self,
        prices: &PriceMap,
        limits: &PositionLimits,
    ) -> Option<RelativeValueSolution> {
        let advantages = AdvantageVector::compute(prices)?;
        let allocation = self.solver.allocate(&advantages, limits);

        let estimated_profit = advantages
            .iter()
            .map(|(product, adv)| adv * allocation.get(&product).copied().unwrap_or(0) as f64)
            .sum();

        Some(RelativeValueSolution {
            advantages,
            allocation,
            estimated_profit,
        })
    }
}

/// Orders moving each non-zero target from the current position
///
/// Crosses the touch when the needed side is present, otherwise rests at the
/// rounded fair value, otherwise at `fallback_price`.
pub fn decompose(
    allocation: &Allocation,
    state: &TradingState,
    prices: &PriceMap,
    fallback_price: i64,
) -> Vec<Order> {
    let mut orders = Vec::new();

    for (&product, &target) in allocation {
        if target == 0 {
            continue;
        }
        let delta = target - state.position_of(product);
        if delta.abs() < 1 {
            continue;
        }

        let touch = state.depth(product).and_then(|depth| {
            if delta > 0 {
                depth.best_ask()
            } else {
                depth.best_bid()
            }
        });
        let price = touch
            .or_else(|| prices.get(&product).map(|fv| fv.round() as i64))
            .unwrap_or(fallback_price);

        orders.push(Order::new(product, price, delta));
    }

    orders
}
