//! Per-tick orchestrator
//!
//! `Trader::run` is the single entry point: one `TradingState` in, one
//! `TickOutput` out. Each tick:
//!
//! 1. optionally restores history from `traderData`
//! 2. builds every product's orders from its policy
//! 3. merges basket relative-value orders, clipped to remaining capacity
//! 4. guards every product's merged orders against its position limit
//! 5. encodes the rolling history into the returned blob

use crate::relative_value::{decompose, PriceMap, RelativeValueSolver};
use crate::reversion::{ReversionParams, ReversionScorer};
use crate::taker_maker::{build_orders, take_threshold};
use anyhow::{Context, Result};
use brine_core::config::EngineConfig;
use brine_core::data::{TickOutput, TradingState};
use brine_core::history::{RollingHistory, VwapSample};
use brine_core::orderbook::{touch_vwap, OrderDepth};
use brine_core::policy::{ExecutionPolicy, PolicyTable, ProductPolicy};
use brine_core::pricing::{fair_value, mid_price, recipe_for, synthetic_fair_value, FairValueMode};
use brine_core::risk::{check_orders, CapacityLedger};
use brine_core::{Order, Product};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Running counters over the trader's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraderStats {
    pub ticks: u64,
    pub orders_emitted: u64,
    pub relative_value_orders: u64,
    pub suppressed_products: u64,
    pub history_restores: u64,
}

/// Multi-product decision engine
#[derive(Debug, Clone)]
pub struct Trader {
    config: EngineConfig,
    policies: PolicyTable,
    history: RollingHistory,
    reversion: ReversionScorer,
    relative_value: RelativeValueSolver,
    stats: TraderStats,
    /// Panic on a guard violation instead of suppressing the product
    panic_on_violation: bool,
}

impl Trader {
    /// Validate `config` and build the policy table
    pub fn new(config: EngineConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid trader configuration")?;

        let policies = PolicyTable::from_config(&config);
        let history =
            RollingHistory::new(config.kelp.history_window, config.squid_ink.history_window);
        let reversion =
            ReversionScorer::new(Product::SquidInk, ReversionParams::from_config(&config));

        Ok(Self {
            config,
            policies,
            history,
            reversion,
            relative_value: RelativeValueSolver::new(),
            stats: TraderStats::default(),
            panic_on_violation: cfg!(debug_assertions),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn stats(&self) -> TraderStats {
        self.stats
    }

    /// Process one tick
    pub fn run(&mut self, state: &TradingState) -> TickOutput {
        self.restore_history(state);

        let mut orders: BTreeMap<Product, Vec<Order>> = BTreeMap::new();
        for product in Product::ALL {
            let Some(policy) = self.policies.get(product).copied() else {
                continue;
            };
            if let Some(product_orders) = self.product_orders(&policy, state) {
                orders.insert(product, product_orders);
            }
        }

        if self.config.relative_value.enabled {
            self.merge_relative_value(state, &mut orders);
        }

        self.enforce_limits(state, &mut orders);

        let trader_data = match self.history.encode() {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Failed to encode history, returning empty traderData");
                String::new()
            }
        };

        let output = TickOutput {
            orders,
            conversions: self.config.conversions,
            trader_data,
        };

        self.stats.ticks += 1;
        self.stats.orders_emitted += output.order_count() as u64;
        debug!(
            timestamp = state.timestamp,
            orders = output.order_count(),
            "Tick complete"
        );

        output
    }

    fn restore_history(&mut self, state: &TradingState) {
        if !self.config.restore_history
            || state.trader_data.is_empty()
            || !self.history.is_empty()
        {
            return;
        }

        match RollingHistory::decode(
            &state.trader_data,
            self.config.kelp.history_window,
            self.config.squid_ink.history_window,
        ) {
            Ok(history) => {
                debug!(
                    kelp = history.kelp_prices.len(),
                    squid_ink = history.squidink_prices.len(),
                    "Restored history from traderData"
                );
                self.history = history;
                self.stats.history_restores += 1;
            }
            Err(e) => warn!(error = %e, "Ignoring undecodable traderData"),
        }
    }

    /// Orders for one product, `None` when the product is not traded this tick
    fn product_orders(
        &mut self,
        policy: &ProductPolicy,
        state: &TradingState,
    ) -> Option<Vec<Order>> {
        let product = policy.product;
        let depth = state.depth(product)?;
        let position = state.position_of(product);
        let limit = policy.limit;

        let orders = match policy.execution {
            ExecutionPolicy::TakerMaker {
                take,
                make,
                require_two_sided,
            } => {
                if require_two_sided && !depth.is_two_sided() {
                    return Some(Vec::new());
                }
                let fv = fair_value(depth, policy.fair_value)?;
                if product == Product::Kelp {
                    self.record_kelp(depth, fv);
                }
                debug!(product = %product, fair_value = fv, position, "Taker-maker");
                build_orders(product, depth, fv, position, limit, take, make)
            }
            ExecutionPolicy::ReversionScored => {
                self.reversion
                    .score(&mut self.history.squidink_prices, depth, position, limit)
            }
            ExecutionPolicy::Threshold { take } => {
                let fv = match policy.fair_value {
                    FairValueMode::Synthetic { basket } => {
                        if !state.has_depths(&Product::COMPONENTS) {
                            return None;
                        }
                        self.synthetic_value(basket, state)?
                    }
                    mode => fair_value(depth, mode)?,
                };
                debug!(product = %product, fair_value = fv, position, "Threshold");
                take_threshold(product, depth, fv, position, limit, take)
            }
        };

        Some(orders)
    }

    fn record_kelp(&mut self, depth: &OrderDepth, fair_value: f64) {
        if let Some((vol, vwap)) = touch_vwap(depth) {
            self.history.record_kelp(fair_value, VwapSample { vol, vwap });
        }
    }

    /// Component fair value under its policy, fallback when the book is absent
    fn component_value(&self, product: Product, state: &TradingState) -> Option<f64> {
        let mode = self.policies.get(product)?.fair_value;
        match state.depth(product) {
            Some(depth) => fair_value(depth, mode),
            None => fair_value(&OrderDepth::new(), mode),
        }
    }

    fn synthetic_value(&self, basket: Product, state: &TradingState) -> Option<f64> {
        synthetic_fair_value(basket, |leg| {
            self.component_value(leg, state).unwrap_or_default()
        })
    }

    /// Component fair values plus basket mids (synthetic when no usable mid)
    fn relative_value_prices(&self, state: &TradingState) -> Option<PriceMap> {
        let mut prices = PriceMap::new();

        for product in self.policies.relative_value_products() {
            let value = match recipe_for(product) {
                Some(_) => {
                    let synthetic = self.synthetic_value(product, state)?;
                    state
                        .depth(product)
                        .and_then(mid_price)
                        .unwrap_or(synthetic)
                }
                None => self.component_value(product, state)?,
            };
            prices.insert(product, value);
        }

        Some(prices)
    }

    fn merge_relative_value(
        &mut self,
        state: &TradingState,
        orders: &mut BTreeMap<Product, Vec<Order>>,
    ) {
        let Some(prices) = self.relative_value_prices(state) else {
            return;
        };
        let Some(solution) = self.relative_value.solve(&prices, &self.config.limits) else {
            return;
        };
        debug!(
            profit = solution.estimated_profit,
            allocation = ?solution.allocation,
            "Relative value solve"
        );

        let decomposed = decompose(
            &solution.allocation,
            state,
            &prices,
            self.config.relative_value.fallback_price,
        );

        for order in decomposed {
            let product = order.symbol;
            let existing = orders.get(&product).map_or(&[][..], |v| v.as_slice());
            let mut ledger = CapacityLedger::with_orders(
                state.position_of(product),
                self.policies.limit(product),
                existing,
            );

            match ledger.clip(order) {
                Some(clipped) => {
                    orders.entry(product).or_default().push(clipped);
                    self.stats.relative_value_orders += 1;
                }
                None => debug!(product = %product, "No capacity left for relative-value order"),
            }
        }
    }

    fn enforce_limits(
        &mut self,
        state: &TradingState,
        orders: &mut BTreeMap<Product, Vec<Order>>,
    ) {
        for (product, product_orders) in orders.iter_mut() {
            let position = state.position_of(*product);
            let limit = self.policies.limit(*product);

            if let Err(violation) = check_orders(*product, product_orders, position, limit) {
                if self.panic_on_violation {
                    panic!("order invariant violated: {}", violation);
                }
                error!(%violation, "Suppressing orders for {}", product);
                product_orders.clear();
                self.stats.suppressed_products += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_core::testing::{assert_within_limits, book, full_market_state, StateBuilder};

    fn trader() -> Trader {
        Trader::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.limits.kelp = 0;
        assert!(Trader::new(config).is_err());
    }

    #[test]
    fn test_empty_state() {
        let mut trader = trader();
        let output = trader.run(&TradingState::default());

        // Relative value still runs on fallback prices, which are all fair
        assert!(output.orders.is_empty());
        assert_eq!(output.conversions, 1);
        assert_eq!(
            output.trader_data,
            r#"{"kelp_prices":[],"kelp_vwap":[],"squidink_prices":[]}"#
        );
    }

    #[test]
    fn test_resin_only_tick() {
        let mut trader = trader();
        let state = StateBuilder::new()
            .book(Product::RainforestResin, book(&[(9_998, 10)], &[(10_002, 10)]))
            .build();

        let output = trader.run(&state);

        assert_eq!(
            output.orders_for(Product::RainforestResin),
            &[
                Order::buy(Product::RainforestResin, 9_999, 50),
                Order::sell(Product::RainforestResin, 10_001, 50),
            ]
        );
        assert_eq!(output.orders.len(), 1);
    }

    #[test]
    fn test_one_sided_kelp_emits_nothing_and_keeps_history() {
        let mut trader = trader();
        let state = StateBuilder::new()
            .book(Product::Kelp, book(&[(1_999, 10)], &[]))
            .build();

        let output = trader.run(&state);

        assert!(output.orders_for(Product::Kelp).is_empty());
        assert!(trader.history().kelp_prices.is_empty());
    }

    #[test]
    fn test_kelp_history_is_bounded() {
        let mut trader = trader();
        let state = StateBuilder::new()
            .book(Product::Kelp, book(&[(1_999, 10)], &[(2_001, 10)]))
            .build();

        for _ in 0..15 {
            trader.run(&state);
        }

        assert_eq!(trader.history().kelp_prices.len(), 10);
        assert_eq!(trader.history().kelp_vwap.len(), 10);
        assert_eq!(
            trader.history().kelp_vwap.latest(),
            Some(&VwapSample {
                vol: 20,
                vwap: 2_000.0
            })
        );
    }

    #[test]
    fn test_basket_needs_all_component_books() {
        let mut trader = trader();
        let state = StateBuilder::new()
            .book(Product::Croissant, book(&[(4_299, 10)], &[(4_301, 10)]))
            .book(Product::Jam, book(&[(6_599, 10)], &[(6_601, 10)]))
            .book(Product::PicnicBasket2, book(&[(30_410, 5)], &[(30_420, 5)]))
            .build();

        let output = trader.run(&state);

        // No DJEMBE book: threshold taking is skipped, but the basket mid sits
        // 15 above synthetic so relative value targets the full long limit
        assert_eq!(
            output.orders_for(Product::PicnicBasket2),
            &[Order::buy(Product::PicnicBasket2, 30_420, 100)]
        );
        assert!(output.orders_for(Product::Croissant).is_empty());
    }

    #[test]
    fn test_relative_value_clipped_after_threshold_orders() {
        let mut trader = trader();
        // Crossed basket book around synthetic 59000: threshold takes both
        // sides, then relative value buys toward +60 with what is left
        let mut state = full_market_state(0);
        state.order_depths.insert(
            Product::PicnicBasket1,
            book(&[(59_120, 80)], &[(58_990, 80)]),
        );

        let output = trader.run(&state);
        let b1 = output.orders_for(Product::PicnicBasket1);

        assert_eq!(
            b1,
            &[
                Order::buy(Product::PicnicBasket1, 58_990, 10),
                Order::sell(Product::PicnicBasket1, 59_120, 10),
                Order::buy(Product::PicnicBasket1, 58_990, 50),
            ]
        );
        assert_within_limits(&output, &state, trader.config());
    }

    #[test]
    fn test_restore_history_is_opt_in() {
        let blob = r#"{"kelp_prices":[2000.0],"kelp_vwap":[],"squidink_prices":[1990.0,1991.0]}"#;
        let state = StateBuilder::new().trader_data(blob).build();

        let mut default_trader = trader();
        default_trader.run(&state);
        assert!(default_trader.history().is_empty());

        let mut config = EngineConfig::default();
        config.restore_history = true;
        let mut restoring = Trader::new(config).unwrap();
        restoring.run(&state);
        assert_eq!(restoring.history().squidink_prices.len(), 2);
        assert_eq!(restoring.stats().history_restores, 1);
    }

    #[test]
    fn test_restore_ignores_garbage() {
        let mut config = EngineConfig::default();
        config.restore_history = true;
        let mut trader = Trader::new(config).unwrap();

        let output = trader.run(&StateBuilder::new().trader_data("{not json").build());

        assert!(trader.history().is_empty());
        assert_eq!(trader.stats().history_restores, 0);
        assert_eq!(output.conversions, 1);
    }

    #[test]
    #[should_panic(expected = "order invariant violated")]
    fn test_guard_panics_when_strict() {
        let mut trader = trader();
        trader.panic_on_violation = true;
        let state = TradingState::default();
        let mut orders = BTreeMap::new();
        orders.insert(Product::Kelp, vec![Order::buy(Product::Kelp, 2_000, 51)]);

        trader.enforce_limits(&state, &mut orders);
    }

    #[test]
    fn test_guard_suppresses_violating_product() {
        let mut trader = trader();
        trader.panic_on_violation = false;

        let state = StateBuilder::new().position(Product::Kelp, 10).build();
        let mut orders = BTreeMap::new();
        orders.insert(Product::Kelp, vec![Order::buy(Product::Kelp, 2_000, 41)]);
        orders.insert(
            Product::RainforestResin,
            vec![Order::sell(Product::RainforestResin, 10_001, 50)],
        );

        trader.enforce_limits(&state, &mut orders);

        assert!(orders[&Product::Kelp].is_empty());
        assert_eq!(orders[&Product::RainforestResin].len(), 1);
        assert_eq!(trader.stats().suppressed_products, 1);
    }

    #[test]
    fn test_full_market_within_limits() {
        let mut trader = trader();
        let state = full_market_state(100);

        let output = trader.run(&state);

        assert_within_limits(&output, &state, trader.config());
        assert_eq!(trader.stats().ticks, 1);
        assert_eq!(trader.stats().suppressed_products, 0);
    }
}
