//! Take-clear-make order construction
//!
//! One pass per product per tick:
//! 1. **Take** the touch when it is through fair
//! 2. **Clear** residual inventory at fair (see [`clear_position`])
//! 3. **Make** with whatever buy and sell capacity is left
//!
//! The threshold variant ([`take_threshold`]) only runs step 1, with a
//! size cap, and is used for the basket components and the baskets.

use crate::clearing::{clear_position, TickVolumes};
use brine_core::orderbook::OrderDepth;
use brine_core::policy::{MakeStyle, TakeParams};
use brine_core::{Order, Product};

/// Full taker-maker order set for one product
pub fn build_orders(
    product: Product,
    depth: &OrderDepth,
    fair_value: f64,
    position: i64,
    limit: i64,
    take: TakeParams,
    make: MakeStyle,
) -> Vec<Order> {
    let mut orders = Vec::new();

    let volumes = take_touch(&mut orders, product, depth, fair_value, position, limit, take);
    let volumes = clear_position(
        &mut orders,
        depth,
        product,
        position,
        limit,
        volumes,
        fair_value,
    );

    let (bid_price, ask_price) = quote_prices(depth, fair_value, make);

    let buy_qty = volumes.buy_capacity(position, limit);
    if buy_qty > 0 {
        orders.push(Order::buy(product, bid_price, buy_qty));
    }
    let sell_qty = volumes.sell_capacity(position, limit);
    if sell_qty > 0 {
        orders.push(Order::sell(product, ask_price, sell_qty));
    }

    orders
}

/// Take-only order set: no clearing, no passive quotes
pub fn take_threshold(
    product: Product,
    depth: &OrderDepth,
    fair_value: f64,
    position: i64,
    limit: i64,
    take: TakeParams,
) -> Vec<Order> {
    let mut orders = Vec::new();
    take_touch(&mut orders, product, depth, fair_value, position, limit, take);
    orders
}

/// Lift the best ask and hit the best bid when they are through fair
///
/// Buys are capped by `limit - position`, sells by `limit + position`.
fn take_touch(
    orders: &mut Vec<Order>,
    product: Product,
    depth: &OrderDepth,
    fair_value: f64,
    position: i64,
    limit: i64,
    take: TakeParams,
) -> TickVolumes {
    let mut volumes = TickVolumes::default();

    if let Some(best_ask) = depth.best_ask() {
        if take.takes_ask(best_ask, fair_value) {
            let available = depth.ask_volume_at(best_ask);
            let qty = take.level_size(available).min(limit - position);
            if qty > 0 {
                orders.push(Order::buy(product, best_ask, qty));
                volumes.bought += qty;
            }
        }
    }

    if let Some(best_bid) = depth.best_bid() {
        if take.takes_bid(best_bid, fair_value) {
            let available = depth.bid_volume_at(best_bid);
            let qty = take.level_size(available).min(limit + position);
            if qty > 0 {
                orders.push(Order::sell(product, best_bid, qty));
                volumes.sold += qty;
            }
        }
    }

    volumes
}

/// Passive (bid, ask) prices
///
/// Fractional prices round away from fair: bids floor, asks ceil.
#[inline]
pub fn quote_prices(depth: &OrderDepth, fair_value: f64, make: MakeStyle) -> (i64, i64) {
    match make {
        MakeStyle::Fixed { edge } => {
            let edge = edge as f64;
            (
                (fair_value - edge).floor() as i64,
                (fair_value + edge).ceil() as i64,
            )
        }
        MakeStyle::Penny {
            edge,
            fallback_edge,
        } => {
            let passive_ask = depth
                .asks_above(fair_value + edge)
                .next()
                .map_or(fair_value + fallback_edge, |p| p as f64);
            let passive_bid = depth
                .bids_below(fair_value - edge)
                .next()
                .map_or(fair_value - fallback_edge, |p| p as f64);

            (
                (passive_bid + 1.0).floor() as i64,
                (passive_ask - 1.0).ceil() as i64,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_core::testing::{book, side_totals};
    use proptest::prelude::*;

    const KELP_PENNY: MakeStyle = MakeStyle::Penny {
        edge: 1.0,
        fallback_edge: 2.0,
    };

    fn kelp_take() -> TakeParams {
        TakeParams::inclusive(1.0).with_adverse_volume(20)
    }

    #[test]
    fn test_resin_takes_cheap_ask_and_quotes_remaining() {
        let depth = book(&[(9_996, 10)], &[(9_998, 5), (10_004, 10)]);

        let orders = build_orders(
            Product::RainforestResin,
            &depth,
            10_000.0,
            0,
            50,
            TakeParams::strict(),
            MakeStyle::Fixed { edge: 1 },
        );

        assert_eq!(
            orders,
            vec![
                Order::buy(Product::RainforestResin, 9_998, 5),
                Order::buy(Product::RainforestResin, 9_999, 45),
                Order::sell(Product::RainforestResin, 10_001, 50),
            ]
        );
    }

    #[test]
    fn test_resin_ask_at_fair_not_taken() {
        let depth = book(&[(9_998, 10)], &[(10_000, 5)]);

        let orders = build_orders(
            Product::RainforestResin,
            &depth,
            10_000.0,
            0,
            50,
            TakeParams::strict(),
            MakeStyle::Fixed { edge: 1 },
        );

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.price == 9_999 || o.price == 10_001));
    }

    #[test]
    fn test_take_capped_by_capacity() {
        // Long 45 of 50: only 5 more may be bought
        let depth = book(&[], &[(9_990, 30)]);

        let orders = build_orders(
            Product::RainforestResin,
            &depth,
            10_000.0,
            45,
            50,
            TakeParams::strict(),
            MakeStyle::Fixed { edge: 1 },
        );

        assert_eq!(orders[0], Order::buy(Product::RainforestResin, 9_990, 5));
        let (bought, sold) = side_totals(&orders);
        assert_eq!(bought, 5);
        assert_eq!(sold, 95);
    }

    #[test]
    fn test_kelp_adverse_volume_guard() {
        // Ask 25 deep is through fair but too large to lift
        let depth = book(&[(1_990, 10)], &[(1_995, 25)]);
        let fair = 2_000.0;

        let orders = build_orders(Product::Kelp, &depth, fair, 0, 50, kelp_take(), KELP_PENNY);

        assert!(orders.iter().all(|o| o.price != 1_995 || o.quantity < 0));
        assert_eq!(side_totals(&orders), (50, 50));
    }

    #[test]
    fn test_kelp_penny_prices() {
        let depth = book(&[(1_996, 5), (1_999, 5)], &[(2_001, 5), (2_004, 5)]);
        // asks above 2001: 2004 -> 2003; bids below 1999: 1996 -> 1997
        let (bid, ask) = quote_prices(&depth, 2_000.0, KELP_PENNY);
        assert_eq!((bid, ask), (1_997, 2_003));
    }

    #[test]
    fn test_kelp_penny_fallback_rounds_away_from_fair() {
        let depth = book(&[(2_000, 5)], &[(2_001, 5)]);
        // Nothing outside fair +/- 1: fair +/- 2, one tick inside
        let (bid, ask) = quote_prices(&depth, 2_000.5, KELP_PENNY);
        assert_eq!((bid, ask), (1_999, 2_002));
    }

    #[test]
    fn test_threshold_take_caps_at_max_volume() {
        let depth = book(&[(4_305, 40)], &[(4_290, 40)]);
        let take = TakeParams::strict().with_max_take_size(10);

        let orders = take_threshold(Product::Croissant, &depth, 4_300.0, 0, 250, take);

        assert_eq!(
            orders,
            vec![
                Order::buy(Product::Croissant, 4_290, 10),
                Order::sell(Product::Croissant, 4_305, 10),
            ]
        );
    }

    #[test]
    fn test_threshold_take_respects_limit() {
        let depth = book(&[], &[(4_290, 40)]);
        let take = TakeParams::strict().with_max_take_size(10);

        let orders = take_threshold(Product::Croissant, &depth, 4_300.0, 246, 250, take);
        assert_eq!(orders, vec![Order::buy(Product::Croissant, 4_290, 4)]);

        let orders = take_threshold(Product::Croissant, &depth, 4_300.0, 250, 250, take);
        assert!(orders.is_empty());
    }

    proptest! {
        #[test]
        fn taker_maker_respects_limits(
            position in -50i64..=50,
            bid in 1_990i64..2_000,
            spread in 1i64..8,
            bid_size in 1i64..40,
            ask_size in 1i64..40,
            fair_offset in -3.0f64..3.0,
        ) {
            let depth = book(&[(bid, bid_size)], &[(bid + spread, ask_size)]);
            let fair = (bid as f64 + (bid + spread) as f64) / 2.0 + fair_offset;

            let orders = build_orders(
                Product::Kelp, &depth, fair, position, 50, kelp_take(), KELP_PENNY,
            );

            let (bought, sold) = side_totals(&orders);
            prop_assert!(bought <= 50 - position);
            prop_assert!(sold <= 50 + position);
            prop_assert!(orders.iter().all(|o| o.quantity != 0));
        }
    }
}
