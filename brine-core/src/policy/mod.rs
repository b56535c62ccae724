//! Per-instrument policy table
//!
//! Maps each product to how its fair value is derived and which execution
//! policy trades it. The table is built once from [`EngineConfig`] and read
//! on every tick.
//!
//! | Product | Fair value | Execution |
//! |---|---|---|
//! | RAINFOREST_RESIN | fixed | taker-maker, fixed quotes |
//! | KELP | volume-weighted | taker-maker, pennying quotes |
//! | SQUID_INK | volume-weighted | reversion-scored |
//! | components | mid | threshold |
//! | baskets | synthetic | threshold |

use crate::config::EngineConfig;
use crate::core::Product;
use crate::pricing::FairValueMode;
use std::collections::BTreeMap;

/// When and how much to take from the touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeParams {
    /// Distance through fair the touch must be
    pub take_width: f64,

    /// `true`: ask < fair - width; `false`: ask <= fair - width
    pub strict: bool,

    /// Cap on the size taken from one level, before the capacity cap
    pub max_take_size: Option<i64>,

    /// Skip a level entirely when it rests more than this
    pub adverse_volume: Option<i64>,
}

impl TakeParams {
    /// Take anything strictly through fair, uncapped
    pub const fn strict() -> Self {
        Self {
            take_width: 0.0,
            strict: true,
            max_take_size: None,
            adverse_volume: None,
        }
    }

    /// Take when the touch is at least `width` through fair
    pub const fn inclusive(width: f64) -> Self {
        Self {
            take_width: width,
            strict: false,
            max_take_size: None,
            adverse_volume: None,
        }
    }

    pub const fn with_max_take_size(mut self, size: i64) -> Self {
        self.max_take_size = Some(size);
        self
    }

    pub const fn with_adverse_volume(mut self, volume: i64) -> Self {
        self.adverse_volume = Some(volume);
        self
    }

    /// Whether an ask at `price` is cheap enough to lift
    #[inline]
    pub fn takes_ask(&self, price: i64, fair_value: f64) -> bool {
        let threshold = fair_value - self.take_width;
        if self.strict {
            (price as f64) < threshold
        } else {
            (price as f64) <= threshold
        }
    }

    /// Whether a bid at `price` is rich enough to hit
    #[inline]
    pub fn takes_bid(&self, price: i64, fair_value: f64) -> bool {
        let threshold = fair_value + self.take_width;
        if self.strict {
            (price as f64) > threshold
        } else {
            (price as f64) >= threshold
        }
    }

    /// Size to take from a level of `available`, before the capacity cap
    ///
    /// Returns 0 when the adverse-volume guard rejects the level.
    #[inline]
    pub fn level_size(&self, available: i64) -> i64 {
        if let Some(adverse) = self.adverse_volume {
            if available > adverse {
                return 0;
            }
        }
        match self.max_take_size {
            Some(cap) => available.min(cap),
            None => available,
        }
    }
}

/// Where passive quotes rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MakeStyle {
    /// Buy at fair - edge, sell at fair + edge
    Fixed { edge: i64 },

    /// Quote one tick inside the nearest level outside fair +/- edge,
    /// else at fair +/- fallback_edge
    Penny { edge: f64, fallback_edge: f64 },
}

/// How a product's orders are built each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutionPolicy {
    /// Take, clear, then make with the remaining capacity
    TakerMaker {
        take: TakeParams,
        make: MakeStyle,
        /// Skip the product entirely when either side of its book is empty
        require_two_sided: bool,
    },

    /// Utility-scored passive quotes around a mean-reverting fair value
    ReversionScored,

    /// Take only, no clearing or making
    Threshold { take: TakeParams },
}

/// Everything the trader needs to know about one product
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductPolicy {
    pub product: Product,
    pub fair_value: FairValueMode,
    pub execution: ExecutionPolicy,
    pub limit: i64,
    /// Part of the basket relative-value solve
    pub relative_value: bool,
}

/// Product -> policy lookup built once per trader
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    entries: BTreeMap<Product, ProductPolicy>,
}

impl PolicyTable {
    /// Build the table for the full instrument universe
    pub fn from_config(config: &EngineConfig) -> Self {
        let entries = Product::ALL
            .into_iter()
            .map(|product| (product, Self::policy_for(product, config)))
            .collect();

        Self { entries }
    }

    fn policy_for(product: Product, config: &EngineConfig) -> ProductPolicy {
        let limit = config.limits.limit(product);
        let threshold = ExecutionPolicy::Threshold {
            take: TakeParams::strict().with_max_take_size(config.execution.max_trade_volume),
        };

        let (fair_value, execution) = match product {
            Product::RainforestResin => (
                FairValueMode::Fixed {
                    value: config.resin.fair_value,
                },
                ExecutionPolicy::TakerMaker {
                    take: TakeParams::strict(),
                    make: MakeStyle::Fixed {
                        edge: config.resin.make_edge,
                    },
                    require_two_sided: false,
                },
            ),
            Product::Kelp => (
                FairValueMode::VolumeWeighted {
                    fallback: config.kelp.fallback_fair_value,
                },
                ExecutionPolicy::TakerMaker {
                    take: TakeParams::inclusive(config.kelp.take_width)
                        .with_adverse_volume(config.kelp.adverse_volume),
                    make: MakeStyle::Penny {
                        edge: config.kelp.make_edge,
                        fallback_edge: config.kelp.default_edge,
                    },
                    require_two_sided: true,
                },
            ),
            Product::SquidInk => (
                FairValueMode::VolumeWeighted {
                    fallback: config.squid_ink.fallback_fair_value,
                },
                ExecutionPolicy::ReversionScored,
            ),
            Product::Croissant | Product::Jam | Product::Djembe => (
                FairValueMode::Mid {
                    fallback: config.components.fallback(product).unwrap_or_default(),
                },
                threshold,
            ),
            Product::PicnicBasket1 | Product::PicnicBasket2 => {
                (FairValueMode::Synthetic { basket: product }, threshold)
            }
        };

        ProductPolicy {
            product,
            fair_value,
            execution,
            limit,
            relative_value: matches!(execution, ExecutionPolicy::Threshold { .. }),
        }
    }

    #[inline]
    pub fn get(&self, product: Product) -> Option<&ProductPolicy> {
        self.entries.get(&product)
    }

    /// Position limit for `product`, 0 for an unknown product
    #[inline]
    pub fn limit(&self, product: Product) -> i64 {
        self.get(product).map_or(0, |p| p.limit)
    }

    /// Policies in product order
    pub fn iter(&self) -> impl Iterator<Item = &ProductPolicy> + '_ {
        self.entries.values()
    }

    /// Products that take part in the relative-value solve
    pub fn relative_value_products(&self) -> impl Iterator<Item = Product> + '_ {
        self.iter().filter(|p| p.relative_value).map(|p| p.product)
    }
}
