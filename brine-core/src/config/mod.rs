pub mod constants;
pub mod types;

pub use types::*;

use crate::core::{ConfigError, Product};
use anyhow::{Context, Result};
use std::path::Path;

impl EngineConfig {
    /// Load configuration from a JSON file
    ///
    /// Missing keys take their defaults. The loaded config is validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let cfg: EngineConfig =
            serde_json::from_str(&raw).context("Failed to deserialize configuration")?;

        cfg.validate().context("Invalid configuration")?;

        Ok(cfg)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for product in Product::ALL {
            let limit = self.limits.limit(product);
            if limit <= 0 {
                return Err(ConfigError::NonPositiveLimit { product, limit });
            }
        }

        let counts = [
            ("execution.max_trade_volume", self.execution.max_trade_volume),
            ("squid_ink.candidate_radius", self.squid_ink.candidate_radius),
            ("kelp.adverse_volume", self.kelp.adverse_volume),
            ("kelp.history_window", self.kelp.history_window as i64),
            ("squid_ink.history_window", self.squid_ink.history_window as i64),
            ("relative_value.fallback_price", self.relative_value.fallback_price),
        ];
        for (name, value) in counts {
            if value < 1 {
                return Err(ConfigError::TooSmall { name, value });
            }
        }

        let coefficients = [
            ("execution.execution_slippage", self.execution.execution_slippage),
            ("execution.transaction_cost", self.execution.transaction_cost),
            ("execution.risk_coefficient", self.execution.risk_coefficient),
            ("execution.reversion_coefficient", self.execution.reversion_coefficient),
            ("kelp.take_width", self.kelp.take_width),
            ("kelp.make_edge", self.kelp.make_edge),
            ("kelp.default_edge", self.kelp.default_edge),
        ];
        for (name, value) in coefficients {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let prices = [
            ("resin.fair_value", self.resin.fair_value),
            ("kelp.fallback_fair_value", self.kelp.fallback_fair_value),
            ("squid_ink.fallback_fair_value", self.squid_ink.fallback_fair_value),
            ("components.croissant_fallback", self.components.croissant_fallback),
            ("components.jam_fallback", self.components.jam_fallback),
            ("components.djembe_fallback", self.components.djembe_fallback),
        ];
        for (name, value) in prices {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidPrice { name, value });
            }
        }

        if self.resin.make_edge < 0 {
            return Err(ConfigError::Negative {
                name: "resin.make_edge",
                value: self.resin.make_edge as f64,
            });
        }

        Ok(())
    }
}
