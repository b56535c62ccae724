use super::constants::*;
use crate::core::Product;
use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Every section is optional in the JSON file; missing values take the
/// defaults from `constants.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub execution: ExecutionParams,

    #[serde(default)]
    pub limits: PositionLimits,

    #[serde(default)]
    pub resin: ResinParams,

    #[serde(default)]
    pub kelp: KelpParams,

    #[serde(default)]
    pub squid_ink: SquidInkParams,

    #[serde(default)]
    pub components: ComponentParams,

    #[serde(default)]
    pub relative_value: RelativeValueParams,

    /// Conversion request returned every tick
    #[serde(default = "default_conversions")]
    pub conversions: i64,

    /// Rebuild history from `traderData` when the in-process history is empty
    #[serde(default)]
    pub restore_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionParams::default(),
            limits: PositionLimits::default(),
            resin: ResinParams::default(),
            kelp: KelpParams::default(),
            squid_ink: SquidInkParams::default(),
            components: ComponentParams::default(),
            relative_value: RelativeValueParams::default(),
            conversions: DEFAULT_CONVERSIONS,
            restore_history: false,
        }
    }
}

/// Execution realism and sizing shared by the scored and threshold strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    #[serde(default = "default_slippage")]
    pub execution_slippage: f64,

    #[serde(default = "default_transaction_cost")]
    pub transaction_cost: f64,

    #[serde(default = "default_risk_coefficient")]
    pub risk_coefficient: f64,

    #[serde(default = "default_max_trade_volume")]
    pub max_trade_volume: i64,

    #[serde(default = "default_reversion_coefficient")]
    pub reversion_coefficient: f64,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            execution_slippage: EXECUTION_SLIPPAGE,
            transaction_cost: TRANSACTION_COST,
            risk_coefficient: RISK_COEFFICIENT,
            max_trade_volume: MAX_TRADE_VOLUME,
            reversion_coefficient: REVERSION_COEFFICIENT,
        }
    }
}

/// Symmetric per-product position limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionLimits {
    #[serde(default = "default_resin_limit")]
    pub rainforest_resin: i64,
    #[serde(default = "default_kelp_limit")]
    pub kelp: i64,
    #[serde(default = "default_squid_ink_limit")]
    pub squid_ink: i64,
    #[serde(default = "default_croissant_limit")]
    pub croissant: i64,
    #[serde(default = "default_jam_limit")]
    pub jam: i64,
    #[serde(default = "default_djembe_limit")]
    pub djembe: i64,
    #[serde(default = "default_basket1_limit")]
    pub picnic_basket1: i64,
    #[serde(default = "default_basket2_limit")]
    pub picnic_basket2: i64,
}

impl PositionLimits {
    /// Limit for `product`
    pub fn limit(&self, product: Product) -> i64 {
        match product {
            Product::RainforestResin => self.rainforest_resin,
            Product::Kelp => self.kelp,
            Product::SquidInk => self.squid_ink,
            Product::Croissant => self.croissant,
            Product::Jam => self.jam,
            Product::Djembe => self.djembe,
            Product::PicnicBasket1 => self.picnic_basket1,
            Product::PicnicBasket2 => self.picnic_basket2,
        }
    }
}

impl Default for PositionLimits {
    fn default() -> Self {
        Self {
            rainforest_resin: RESIN_POSITION_LIMIT,
            kelp: KELP_POSITION_LIMIT,
            squid_ink: SQUID_INK_POSITION_LIMIT,
            croissant: CROISSANT_POSITION_LIMIT,
            jam: JAM_POSITION_LIMIT,
            djembe: DJEMBE_POSITION_LIMIT,
            picnic_basket1: PICNIC_BASKET1_POSITION_LIMIT,
            picnic_basket2: PICNIC_BASKET2_POSITION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResinParams {
    #[serde(default = "default_resin_fair_value")]
    pub fair_value: f64,

    #[serde(default = "default_resin_make_edge")]
    pub make_edge: i64,
}

impl Default for ResinParams {
    fn default() -> Self {
        Self {
            fair_value: RESIN_FAIR_VALUE,
            make_edge: RESIN_MAKE_EDGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KelpParams {
    #[serde(default = "default_kelp_fallback")]
    pub fallback_fair_value: f64,

    #[serde(default = "default_kelp_take_width")]
    pub take_width: f64,

    /// Levels resting more than this are not taken
    #[serde(default = "default_kelp_adverse_volume")]
    pub adverse_volume: i64,

    #[serde(default = "default_kelp_make_edge")]
    pub make_edge: f64,

    #[serde(default = "default_kelp_default_edge")]
    pub default_edge: f64,

    #[serde(default = "default_kelp_window")]
    pub history_window: usize,
}

impl Default for KelpParams {
    fn default() -> Self {
        Self {
            fallback_fair_value: KELP_FALLBACK_FAIR_VALUE,
            take_width: KELP_TAKE_WIDTH,
            adverse_volume: KELP_ADVERSE_VOLUME,
            make_edge: KELP_MAKE_EDGE,
            default_edge: KELP_DEFAULT_EDGE,
            history_window: KELP_HISTORY_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquidInkParams {
    #[serde(default = "default_squid_ink_fallback")]
    pub fallback_fair_value: f64,

    #[serde(default = "default_squid_ink_radius")]
    pub candidate_radius: i64,

    #[serde(default = "default_squid_ink_window")]
    pub history_window: usize,
}

impl Default for SquidInkParams {
    fn default() -> Self {
        Self {
            fallback_fair_value: SQUID_INK_FALLBACK_FAIR_VALUE,
            candidate_radius: SQUID_INK_CANDIDATE_RADIUS,
            history_window: SQUID_INK_HISTORY_WINDOW,
        }
    }
}

/// Mid-price fallbacks for the basket components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentParams {
    #[serde(default = "default_croissant_fallback")]
    pub croissant_fallback: f64,

    #[serde(default = "default_jam_fallback")]
    pub jam_fallback: f64,

    #[serde(default = "default_djembe_fallback")]
    pub djembe_fallback: f64,
}

impl ComponentParams {
    /// Fallback fair value for a component, `None` for other products
    pub fn fallback(&self, product: Product) -> Option<f64> {
        match product {
            Product::Croissant => Some(self.croissant_fallback),
            Product::Jam => Some(self.jam_fallback),
            Product::Djembe => Some(self.djembe_fallback),
            _ => None,
        }
    }
}

impl Default for ComponentParams {
    fn default() -> Self {
        Self {
            croissant_fallback: CROISSANT_FALLBACK_FAIR_VALUE,
            jam_fallback: JAM_FALLBACK_FAIR_VALUE,
            djembe_fallback: DJEMBE_FALLBACK_FAIR_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeValueParams {
    /// Run the basket arbitrage solve each tick
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_decompose_fallback")]
    pub fallback_price: i64,
}

impl Default for RelativeValueParams {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback_price: DECOMPOSE_FALLBACK_PRICE,
        }
    }
}

fn default_conversions() -> i64 {
    DEFAULT_CONVERSIONS
}

fn default_true() -> bool {
    true
}

fn default_slippage() -> f64 {
    EXECUTION_SLIPPAGE
}

fn default_transaction_cost() -> f64 {
    TRANSACTION_COST
}

fn default_risk_coefficient() -> f64 {
    RISK_COEFFICIENT
}

fn default_max_trade_volume() -> i64 {
    MAX_TRADE_VOLUME
}

fn default_reversion_coefficient() -> f64 {
    REVERSION_COEFFICIENT
}

fn default_resin_limit() -> i64 {
    RESIN_POSITION_LIMIT
}

fn default_kelp_limit() -> i64 {
    KELP_POSITION_LIMIT
}

fn default_squid_ink_limit() -> i64 {
    SQUID_INK_POSITION_LIMIT
}

fn default_croissant_limit() -> i64 {
    CROISSANT_POSITION_LIMIT
}

fn default_jam_limit() -> i64 {
    JAM_POSITION_LIMIT
}

fn default_djembe_limit() -> i64 {
    DJEMBE_POSITION_LIMIT
}

fn default_basket1_limit() -> i64 {
    PICNIC_BASKET1_POSITION_LIMIT
}

fn default_basket2_limit() -> i64 {
    PICNIC_BASKET2_POSITION_LIMIT
}

fn default_resin_fair_value() -> f64 {
    RESIN_FAIR_VALUE
}

fn default_resin_make_edge() -> i64 {
    RESIN_MAKE_EDGE
}

fn default_kelp_fallback() -> f64 {
    KELP_FALLBACK_FAIR_VALUE
}

fn default_kelp_take_width() -> f64 {
    KELP_TAKE_WIDTH
}

fn default_kelp_adverse_volume() -> i64 {
    KELP_ADVERSE_VOLUME
}

fn default_kelp_make_edge() -> f64 {
    KELP_MAKE_EDGE
}

fn default_kelp_default_edge() -> f64 {
    KELP_DEFAULT_EDGE
}

fn default_kelp_window() -> usize {
    KELP_HISTORY_WINDOW
}

fn default_squid_ink_fallback() -> f64 {
    SQUID_INK_FALLBACK_FAIR_VALUE
}

fn default_squid_ink_radius() -> i64 {
    SQUID_INK_CANDIDATE_RADIUS
}

fn default_squid_ink_window() -> usize {
    SQUID_INK_HISTORY_WINDOW
}

fn default_croissant_fallback() -> f64 {
    CROISSANT_FALLBACK_FAIR_VALUE
}

fn default_jam_fallback() -> f64 {
    JAM_FALLBACK_FAIR_VALUE
}

fn default_djembe_fallback() -> f64 {
    DJEMBE_FALLBACK_FAIR_VALUE
}

fn default_decompose_fallback() -> i64 {
    DECOMPOSE_FALLBACK_PRICE
}
