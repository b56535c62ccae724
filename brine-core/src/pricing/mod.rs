//! Fair value estimation and basket definitions

pub mod fair_value;

pub use fair_value::{
    fair_value, mid_price, recipe_for, synthetic_fair_value,
    volume_weighted_fair_value, BasketRecipe, FairValueMode, PICNIC_BASKET1, PICNIC_BASKET2,
};
