//! Default strategy parameters
//!
//! `EngineConfig::default()` is built from these values; a JSON config file
//! can override any of them.

// ===== POSITION LIMITS =====

pub const RESIN_POSITION_LIMIT: i64 = 50;
pub const KELP_POSITION_LIMIT: i64 = 50;
pub const SQUID_INK_POSITION_LIMIT: i64 = 50;
pub const CROISSANT_POSITION_LIMIT: i64 = 250;
pub const JAM_POSITION_LIMIT: i64 = 350;
pub const DJEMBE_POSITION_LIMIT: i64 = 60;
pub const PICNIC_BASKET1_POSITION_LIMIT: i64 = 60;
pub const PICNIC_BASKET2_POSITION_LIMIT: i64 = 100;

// ===== EXECUTION REALISM =====

/// Expected slippage per unit when a passive quote fills
pub const EXECUTION_SLIPPAGE: f64 = 0.2;

/// Per-unit transaction cost
pub const TRANSACTION_COST: f64 = 0.2;

/// Inventory penalty per unit of post-trade position
pub const RISK_COEFFICIENT: f64 = 0.05;

/// Maximum size per scored or threshold order
pub const MAX_TRADE_VOLUME: i64 = 10;

/// Weight of the z-score reversion bonus
pub const REVERSION_COEFFICIENT: f64 = 0.5;

// ===== RAINFOREST_RESIN =====

/// Resin never drifts
pub const RESIN_FAIR_VALUE: f64 = 10_000.0;

/// Passive quotes sit one tick either side of fair
pub const RESIN_MAKE_EDGE: i64 = 1;

// ===== KELP =====

pub const KELP_FALLBACK_FAIR_VALUE: f64 = 2_000.0;

/// Take only when the touch is at least this far through fair
pub const KELP_TAKE_WIDTH: f64 = 1.0;

/// Skip taking a level resting more than this (adverse selection guard)
pub const KELP_ADVERSE_VOLUME: i64 = 20;

/// Resting levels inside fair +/- this are not pennied
pub const KELP_MAKE_EDGE: f64 = 1.0;

/// Quote distance from fair when nothing rests outside the edge
pub const KELP_DEFAULT_EDGE: f64 = 2.0;

/// Number of ticks of KELP history kept
pub const KELP_HISTORY_WINDOW: usize = 10;

// ===== SQUID_INK =====

pub const SQUID_INK_FALLBACK_FAIR_VALUE: f64 = 2_000.0;

/// Candidate prices span fair +/- this many ticks
pub const SQUID_INK_CANDIDATE_RADIUS: i64 = 2;

/// Number of fair values in the z-score window
pub const SQUID_INK_HISTORY_WINDOW: usize = 10;

// ===== BASKET COMPONENTS =====

pub const CROISSANT_FALLBACK_FAIR_VALUE: f64 = 4_300.0;
pub const JAM_FALLBACK_FAIR_VALUE: f64 = 6_600.0;
pub const DJEMBE_FALLBACK_FAIR_VALUE: f64 = 13_400.0;

// ===== RELATIVE VALUE =====

/// Order price when a product has neither a usable book side nor a fair value
pub const DECOMPOSE_FALLBACK_PRICE: i64 = 1_000;

// ===== OUTPUT =====

/// Conversion request returned every tick
pub const DEFAULT_CONVERSIONS: i64 = 1;
