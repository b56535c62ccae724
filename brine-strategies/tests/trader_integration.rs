//! End-to-end tests driving `Trader::run`
//!
//! Covers the tick contract (orders, conversions, traderData), cross-tick
//! history, the relative-value merge and limit safety over random markets.

use brine_core::config::EngineConfig;
use brine_core::history::RollingHistory;
use brine_core::orderbook::OrderDepth;
use brine_core::testing::{
    assert_within_limits, book, full_market_state, side_totals, touch_book, StateBuilder,
};
use brine_core::{Order, Product, TradingState};
use brine_strategies::relative_value::{PriceMap, RELATIVE_VALUE_PRODUCTS};
use brine_strategies::{RelativeValueSolver, Trader};
use proptest::prelude::*;

fn trader() -> Trader {
    Trader::new(EngineConfig::default()).unwrap()
}

#[test]
fn test_state_from_json() {
    let raw = r#"{
        "timestamp": 1200,
        "order_depths": {
            "RAINFOREST_RESIN": {
                "buy_orders": {"9996": 5, "9998": 10},
                "sell_orders": {"9999": -4, "10004": -20}
            }
        },
        "position": {"RAINFOREST_RESIN": 3},
        "traderData": ""
    }"#;
    let state: TradingState = serde_json::from_str(raw).unwrap();

    let output = trader().run(&state);

    // Lift the 9999 ask, then quote the remaining capacity at fair +/- 1
    assert_eq!(
        output.orders_for(Product::RainforestResin),
        &[
            Order::buy(Product::RainforestResin, 9_999, 4),
            Order::buy(Product::RainforestResin, 9_999, 43),
            Order::sell(Product::RainforestResin, 10_001, 53),
        ]
    );

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["conversions"], 1);
    assert_eq!(json["orders"]["RAINFOREST_RESIN"][0]["symbol"], "RAINFOREST_RESIN");
    assert!(json["traderData"].is_string());
}

#[test]
fn test_clearing_flattens_long_inventory() {
    // Long 5 after taking nothing, bid for 8 resting at fair
    let state = StateBuilder::new()
        .book(Product::RainforestResin, book(&[(10_000, 8)], &[(10_003, 10)]))
        .position(Product::RainforestResin, 5)
        .build();

    let output = trader().run(&state);
    let resin = output.orders_for(Product::RainforestResin);

    assert_eq!(resin[0], Order::sell(Product::RainforestResin, 10_000, 5));
    assert_eq!(side_totals(resin), (45, 55));
}

#[test]
fn test_empty_books_emit_no_taking_orders() {
    let state = StateBuilder::new()
        .book(Product::RainforestResin, OrderDepth::new())
        .book(Product::Kelp, OrderDepth::new())
        .book(Product::SquidInk, OrderDepth::new())
        .build();

    let output = trader().run(&state);

    // RESIN makes around its fixed fair value only
    assert_eq!(
        output.orders_for(Product::RainforestResin),
        &[
            Order::buy(Product::RainforestResin, 9_999, 50),
            Order::sell(Product::RainforestResin, 10_001, 50),
        ]
    );
    // KELP has no fair value worth quoting around
    assert!(output.orders_for(Product::Kelp).is_empty());
    // SQUID_INK quotes passively around its fallback
    let squid = output.orders_for(Product::SquidInk);
    assert_eq!(squid.len(), 2);
    assert!(squid[0].price < 2_000 && squid[1].price > 2_000);
}

#[test]
fn test_constant_history_has_no_reversion_bonus() {
    let mut trader = trader();
    let state = StateBuilder::new()
        .book(Product::SquidInk, book(&[(1_990, 10)], &[(2_010, 10)]))
        .build();

    let last = (0..12).map(|_| trader.run(&state)).last().unwrap();

    // Flat window: z = 0, every far candidate scores 0 and ties keep the lowest
    assert_eq!(
        last.orders_for(Product::SquidInk),
        &[
            Order::buy(Product::SquidInk, 1_998, 10),
            Order::sell(Product::SquidInk, 2_001, 10),
        ]
    );
    assert_eq!(trader.history().squidink_prices.len(), 10);
}

#[test]
fn test_drop_below_mean_favours_buying() {
    let mut trader = trader();
    let calm = StateBuilder::new()
        .book(Product::SquidInk, book(&[(1_999, 10)], &[(2_001, 10)]))
        .build();
    for _ in 0..9 {
        trader.run(&calm);
    }

    let dip = StateBuilder::new()
        .book(Product::SquidInk, book(&[(1_989, 10)], &[(1_991, 10)]))
        .build();
    let output = trader.run(&dip);

    // z = -3 adds 1.5 to every buy candidate; the far one wins the tie
    assert_eq!(
        output.orders_for(Product::SquidInk)[0],
        Order::buy(Product::SquidInk, 1_988, 10)
    );
}

#[test]
fn test_relative_value_reference_case() {
    // B1 model value 6*100 + 3*50 + 20 = 770, priced 15 above; B2 fair at 500
    let prices: PriceMap = RELATIVE_VALUE_PRODUCTS
        .into_iter()
        .zip([100.0, 50.0, 20.0, 785.0, 500.0])
        .collect();

    let solution = RelativeValueSolver::new()
        .solve(&prices, &EngineConfig::default().limits)
        .unwrap();

    assert_eq!(solution.allocation[&Product::PicnicBasket1], 60);
    assert_eq!(solution.allocation[&Product::Croissant], 0);
    assert_eq!(solution.allocation[&Product::PicnicBasket2], 0);
    assert!((solution.estimated_profit - 900.0).abs() < 1e-9);
}

#[test]
fn test_relative_value_appends_to_threshold_orders() {
    let mut trader = trader();
    let mut state = full_market_state(0);
    // Basket bid 100 above synthetic: threshold sells 10, relative value buys 60
    state
        .order_depths
        .insert(Product::PicnicBasket1, book(&[(59_100, 30)], &[(59_110, 30)]));

    let output = trader.run(&state);

    assert_eq!(
        output.orders_for(Product::PicnicBasket1),
        &[
            Order::sell(Product::PicnicBasket1, 59_100, 10),
            Order::buy(Product::PicnicBasket1, 59_110, 60),
        ]
    );
    assert_within_limits(&output, &state, trader.config());
}

#[test]
fn test_trader_data_round_trips() {
    let mut trader = trader();
    let state = full_market_state(0);
    let output = (0..3).map(|_| trader.run(&state)).last().unwrap();

    let decoded = RollingHistory::decode(&output.trader_data, 10, 10).unwrap();
    assert_eq!(&decoded, trader.history());
    assert_eq!(decoded.kelp_prices.len(), 3);
    assert_eq!(decoded.squidink_prices.len(), 3);
}

#[test]
fn test_restored_history_continues_window() {
    let mut first = trader();
    let state = full_market_state(0);
    let blob = (0..4).map(|_| first.run(&state).trader_data).last().unwrap();

    let mut config = EngineConfig::default();
    config.restore_history = true;
    let mut second = Trader::new(config).unwrap();
    let mut resumed = state.clone();
    resumed.trader_data = blob;
    second.run(&resumed);

    assert_eq!(second.history().kelp_prices.len(), 5);
    assert_eq!(second.history().squidink_prices.len(), 5);
}

#[test]
fn test_runs_are_deterministic() {
    let mut a = trader();
    let mut b = trader();
    for t in 0..5 {
        let state = full_market_state(t * 100);
        assert_eq!(a.run(&state), b.run(&state));
    }
}

#[test]
fn test_config_overrides_limits() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"limits": {"rainforest_resin": 10}, "conversions": 0}"#).unwrap();
    let mut trader = Trader::new(config).unwrap();
    let state = StateBuilder::new()
        .book(Product::RainforestResin, touch_book(10_000, 3, 5))
        .build();

    let output = trader.run(&state);

    assert_eq!(output.conversions, 0);
    assert_eq!(side_totals(output.orders_for(Product::RainforestResin)), (10, 10));
}

fn arb_book(mid: i64) -> impl Strategy<Value = Option<OrderDepth>> {
    let levels = prop::collection::vec((-8i64..=8, 0i64..40), 0..4);
    prop::option::weighted(0.9, (levels.clone(), levels)).prop_map(move |maybe| {
        maybe.map(|(bids, asks)| {
            let bids: Vec<(i64, i64)> = bids
                .into_iter()
                .map(|(offset, size)| (mid - 1 - offset.abs(), size))
                .collect();
            let asks: Vec<(i64, i64)> = asks
                .into_iter()
                .map(|(offset, size)| (mid + 1 + offset.abs(), size))
                .collect();
            book(&bids, &asks)
        })
    })
}

fn arb_state() -> impl Strategy<Value = TradingState> {
    let mids = [10_000i64, 2_000, 1_950, 4_300, 6_600, 13_400, 59_000, 30_400];
    let books: Vec<_> = mids.iter().map(|&m| arb_book(m)).collect();
    let positions = prop::collection::vec(-1.0f64..=1.0, 8);

    (books, positions).prop_map(|(books, positions)| {
        let config = EngineConfig::default();
        let mut builder = StateBuilder::new();
        for ((product, depth), frac) in Product::ALL.into_iter().zip(books).zip(positions) {
            if let Some(depth) = depth {
                builder = builder.book(product, depth);
            }
            let limit = config.limits.limit(product) as f64;
            builder = builder.position(product, (frac * limit).round() as i64);
        }
        builder.build()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn merged_orders_stay_within_limits(states in prop::collection::vec(arb_state(), 1..6)) {
        let mut trader = trader();
        for state in &states {
            let output = trader.run(state);
            assert_within_limits(&output, state, trader.config());
            prop_assert_eq!(output.conversions, 1);
        }
        prop_assert_eq!(trader.stats().suppressed_products, 0);
    }
}
