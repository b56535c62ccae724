//! Tick sources for the replay harness
//!
//! - `JsonLinesFeed`: one serialized `TradingState` per line
//! - `SyntheticFeed`: seeded random-walk books for the whole universe

use anyhow::{Context, Result};
use brine_core::{OrderDepth, Product, TradingState};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::BufRead;

/// Reads one `TradingState` per non-blank line
pub struct JsonLinesFeed<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesFeed<R> {
    type Item = Result<TradingState>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            self.line_number += 1;

            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("Failed to read line {}", self.line_number)),
                    )
                }
            }

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str(line)
                    .with_context(|| format!("Malformed tick on line {}", self.line_number)),
            );
        }
    }
}

/// Starting mid and half-spread per product
const SEED_BOOKS: [(Product, f64, i64); 8] = [
    (Product::RainforestResin, 10_000.0, 2),
    (Product::Kelp, 2_000.0, 1),
    (Product::SquidInk, 1_900.0, 1),
    (Product::Croissant, 4_300.0, 1),
    (Product::Jam, 6_600.0, 1),
    (Product::Djembe, 13_400.0, 1),
    (Product::PicnicBasket1, 59_200.0, 5),
    (Product::PicnicBasket2, 30_400.0, 5),
];

/// Chance that one side of a book is missing on a tick
const ONE_SIDED_PROBABILITY: f64 = 0.05;

/// Simulator step between ticks
const TIMESTAMP_STEP: i64 = 100;

/// Deterministic random-walk market
///
/// Positions stay flat; the harness does not simulate fills.
pub struct SyntheticFeed {
    rng: StdRng,
    mids: [f64; 8],
    timestamp: i64,
    remaining: usize,
}

impl SyntheticFeed {
    pub fn new(ticks: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mids: SEED_BOOKS.map(|(_, mid, _)| mid),
            timestamp: 0,
            remaining: ticks,
        }
    }

    fn step_book(&mut self, index: usize) -> OrderDepth {
        let (_, start, half_spread) = SEED_BOOKS[index];

        // Resin is pinned; everything else drifts a fraction of its spread
        if index > 0 {
            let drift = self.rng.gen_range(-1.0..=1.0) * half_spread as f64;
            self.mids[index] = (self.mids[index] + drift).max(start * 0.5);
        }

        let mid = self.mids[index].round() as i64;
        let spread = half_spread + self.rng.gen_range(0..=1);
        let mut depth = OrderDepth::new();

        let levels = self.rng.gen_range(1..=3);
        let drop_bids = self.rng.gen_bool(ONE_SIDED_PROBABILITY);
        let drop_asks = !drop_bids && self.rng.gen_bool(ONE_SIDED_PROBABILITY);

        for level in 0..levels {
            if !drop_bids {
                depth
                    .buy_orders
                    .insert(mid - spread - level, self.rng.gen_range(1..=30));
            }
            if !drop_asks {
                depth
                    .sell_orders
                    .insert(mid + spread + level, -self.rng.gen_range(1..=30));
            }
        }

        depth
    }
}

impl Iterator for SyntheticFeed {
    type Item = TradingState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut state = TradingState {
            timestamp: self.timestamp,
            ..TradingState::default()
        };
        for (index, (product, _, _)) in SEED_BOOKS.into_iter().enumerate() {
            let depth = self.step_book(index);
            state.order_depths.insert(product, depth);
        }

        self.timestamp += TIMESTAMP_STEP;
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_json_lines_skip_blanks() {
        let input = concat!(
            r#"{"timestamp": 0, "order_depths": {"KELP": {"buy_orders": {"1999": 5}, "sell_orders": {"2001": -5}}}}"#,
            "\n\n",
            r#"{"timestamp": 100, "position": {"KELP": 3}}"#,
            "\n",
        );

        let states: Vec<TradingState> = JsonLinesFeed::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(states.len(), 2);
        assert_eq!(states[0].depth(Product::Kelp).unwrap().best_bid(), Some(1999));
        assert_eq!(states[1].position_of(Product::Kelp), 3);
    }

    #[test]
    fn test_malformed_line_reports_number() {
        let input = "{}\n{not json}\n";
        let mut feed = JsonLinesFeed::new(Cursor::new(input));

        assert!(feed.next().unwrap().is_ok());
        let err = feed.next().unwrap().unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert!(feed.next().is_none());
    }

    #[test]
    fn test_synthetic_feed_is_seeded() {
        let a: Vec<_> = SyntheticFeed::new(20, 7).map(|s| s.order_depths).collect();
        let b: Vec<_> = SyntheticFeed::new(20, 7).map(|s| s.order_depths).collect();
        let c: Vec<_> = SyntheticFeed::new(20, 8).map(|s| s.order_depths).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_synthetic_books_never_cross() {
        let feed = SyntheticFeed::new(200, 42);
        assert_eq!(feed.size_hint(), (200, Some(200)));

        for state in feed {
            assert_eq!(state.order_depths.len(), 8);
            for depth in state.order_depths.values() {
                assert!(depth.has_bids() || depth.has_asks());
                if let (Some(bid), Some(ask)) = (depth.best_bid(), depth.best_ask()) {
                    assert!(bid < ask);
                }
            }
        }
    }

    #[test]
    fn test_resin_mid_is_pinned() {
        for state in SyntheticFeed::new(50, 1) {
            let resin = state.depth(Product::RainforestResin).unwrap();
            if let Some(bid) = resin.best_bid() {
                assert!((9_997..=9_998).contains(&bid));
            }
        }
    }
}
