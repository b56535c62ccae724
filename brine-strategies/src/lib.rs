//! Brine Strategies - order construction and the per-tick trader
//!
//! ## Available Strategies
//!
//! ### Taker-maker ([`taker_maker::build_orders`])
//!
//! Takes the touch when it is through fair, clears residual inventory at
//! fair, then quotes the remaining capacity passively. RAINFOREST_RESIN
//! quotes at a fixed edge; KELP pennies the nearest level outside its edge.
//!
//! ### Threshold ([`taker_maker::take_threshold`])
//!
//! Take-only with a per-order size cap. Used for the basket components
//! (fair = mid) and the baskets (fair = synthetic value of the components).
//!
//! ### Reversion scoring ([`ReversionScorer`])
//!
//! Scores passive prices around a volume-weighted fair value with execution
//! probability, costs, inventory penalty and a z-score reversion bonus.
//!
//! ### Relative value ([`RelativeValueSolver`])
//!
//! Targets full-limit basket positions in the direction of the basket's
//! advantage over its component model, then decomposes the targets into
//! orders from the current positions.
//!
//! ## Orchestration
//!
//! [`Trader`] wires the strategies to the policy table and guards every
//! product's merged orders against its position limit.

pub mod clearing;
pub mod relative_value;
pub mod reversion;
pub mod taker_maker;
pub mod trader;

pub use clearing::{clear_position, TickVolumes};
pub use relative_value::{
    decompose, AdvantageVector, Allocation, AllocationSolver, PriceMap, RelativeValueSolution,
    RelativeValueSolver, SignInspection,
};
pub use reversion::{ReversionParams, ReversionScorer};
pub use taker_maker::{build_orders, take_threshold};
pub use trader::{Trader, TraderStats};
