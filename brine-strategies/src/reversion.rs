//! Mean-reversion utility scoring
//!
//! Quotes one buy and one sell around a volume-weighted fair value. Each
//! integer candidate within `fair +/- radius` is scored as
//!
//! ```text
//! utility = (edge - slippage - cost - risk * |position +/- 1|) * fill_prob + bonus
//! fill_prob = max(0, 1 - distance_to_touch / radius)
//! bonus = reversion * |z|   (buy side when z < 0, sell side when z > 0)
//! ```
//!
//! where `z` is the z-score of the current fair value within the rolling
//! window. The highest-utility candidate wins each side; ties keep the
//! lower price.

use brine_core::config::EngineConfig;
use brine_core::history::RollingWindow;
use brine_core::orderbook::OrderDepth;
use brine_core::pricing::volume_weighted_fair_value;
use brine_core::{Order, Product};
use tracing::debug;

/// Scoring coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversionParams {
    pub execution_slippage: f64,
    pub transaction_cost: f64,
    pub risk_coefficient: f64,
    pub reversion_coefficient: f64,
    pub max_trade_volume: i64,
    pub candidate_radius: i64,
    pub fallback_fair_value: f64,
}

impl ReversionParams {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            execution_slippage: config.execution.execution_slippage,
            transaction_cost: config.execution.transaction_cost,
            risk_coefficient: config.execution.risk_coefficient,
            reversion_coefficient: config.execution.reversion_coefficient,
            max_trade_volume: config.execution.max_trade_volume,
            candidate_radius: config.squid_ink.candidate_radius,
            fallback_fair_value: config.squid_ink.fallback_fair_value,
        }
    }
}

/// Best candidate on one side
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pick {
    price: i64,
    utility: f64,
}

impl Pick {
    /// Keep the first strictly-better candidate
    fn consider(best: &mut Option<Pick>, price: i64, utility: f64) {
        if best.map_or(true, |b| utility > b.utility) {
            *best = Some(Pick { price, utility });
        }
    }
}

/// Utility-scored quoting for a mean-reverting product
#[derive(Debug, Clone)]
pub struct ReversionScorer {
    product: Product,
    params: ReversionParams,
}

impl ReversionScorer {
    pub fn new(product: Product, params: ReversionParams) -> Self {
        Self { product, params }
    }

    pub fn params(&self) -> &ReversionParams {
        &self.params
    }

    /// Fair value for scoring: volume-weighted, fallback on a degenerate book
    pub fn fair_value(&self, depth: &OrderDepth) -> f64 {
        match volume_weighted_fair_value(depth) {
            Some(fv) if fv != 0.0 => fv,
            _ => self.params.fallback_fair_value,
        }
    }

    /// Mean and population std of the window
    #[inline]
    pub fn swing_metric(window: &RollingWindow<f64>) -> (f64, f64) {
        window.mean_std()
    }

    /// z-score of `fair_value` against the window, 0 when the window is flat
    pub fn z_score(fair_value: f64, window: &RollingWindow<f64>) -> f64 {
        let (mean, std) = Self::swing_metric(window);
        if std > 0.0 {
            (fair_value - mean) / std
        } else {
            0.0
        }
    }

    fn fill_probability(&self, distance: f64) -> f64 {
        (1.0 - distance / self.params.candidate_radius as f64).max(0.0)
    }

    /// Utility of resting a buy at `price`
    pub fn buy_utility(
        &self,
        price: i64,
        fair_value: f64,
        best_ask: Option<i64>,
        position: i64,
        z: f64,
    ) -> f64 {
        let p = &self.params;
        let distance = best_ask.map_or(p.candidate_radius as f64, |ask| (ask - price) as f64);
        let profit = fair_value - price as f64 - p.execution_slippage - p.transaction_cost;
        let penalty = p.risk_coefficient * (position + 1).abs() as f64;
        let bonus = if z < 0.0 { p.reversion_coefficient * -z } else { 0.0 };

        (profit - penalty) * self.fill_probability(distance) + bonus
    }

    /// Utility of resting a sell at `price`
    pub fn sell_utility(
        &self,
        price: i64,
        fair_value: f64,
        best_bid: Option<i64>,
        position: i64,
        z: f64,
    ) -> f64 {
        let p = &self.params;
        let distance = best_bid.map_or(p.candidate_radius as f64, |bid| (price - bid) as f64);
        let profit = price as f64 - fair_value - p.execution_slippage - p.transaction_cost;
        let penalty = p.risk_coefficient * (position - 1).abs() as f64;
        let bonus = if z > 0.0 { p.reversion_coefficient * z } else { 0.0 };

        (profit - penalty) * self.fill_probability(distance) + bonus
    }

    /// Record this tick's fair value in `window` and return 0-2 quotes
    pub fn score(
        &self,
        window: &mut RollingWindow<f64>,
        depth: &OrderDepth,
        position: i64,
        limit: i64,
    ) -> Vec<Order> {
        let fair_value = self.fair_value(depth);
        window.push(fair_value);
        let z = Self::z_score(fair_value, window);

        let best_ask = depth.best_ask();
        let best_bid = depth.best_bid();
        let radius = self.params.candidate_radius;

        let mut best_buy = None;
        let mut best_sell = None;
        for offset in -radius..=radius {
            let price = (fair_value + offset as f64).trunc() as i64;
            if (price as f64) < fair_value {
                let utility = self.buy_utility(price, fair_value, best_ask, position, z);
                Pick::consider(&mut best_buy, price, utility);
            }
            if (price as f64) > fair_value {
                let utility = self.sell_utility(price, fair_value, best_bid, position, z);
                Pick::consider(&mut best_sell, price, utility);
            }
        }

        debug!(
            product = %self.product,
            fair_value,
            z,
            buy = ?best_buy.map(|p| p.price),
            sell = ?best_sell.map(|p| p.price),
            "Reversion scores"
        );

        let mut orders = Vec::with_capacity(2);
        let buy_volume = self.params.max_trade_volume.min(limit - position);
        if let Some(pick) = best_buy {
            if buy_volume > 0 {
                orders.push(Order::buy(self.product, pick.price, buy_volume));
            }
        }
        let sell_volume = self.params.max_trade_volume.min(limit + position);
        if let Some(pick) = best_sell {
            if sell_volume > 0 {
                orders.push(Order::sell(self.product, pick.price, sell_volume));
            }
        }
        orders
    }
}
