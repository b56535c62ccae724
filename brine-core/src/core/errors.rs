//! Domain-specific error types for engine operations
//!
//! Degenerate market data never produces an error; these types only cover
//! internal defects and malformed external inputs.

use super::types::{Product, Side};
use thiserror::Error;

/// An order set that breaks an engine invariant
///
/// Raised by the per-tick guard on merged orders. Always a defect in the
/// strategy code, never a market condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// An order with zero quantity was emitted
    #[error("{product}: zero-quantity order at price {price}")]
    ZeroQuantity { product: Product, price: i64 },

    /// Total size on one side would push the position past its limit
    #[error(
        "{product}: {side} total {total} exceeds capacity {capacity} (position {position}, limit {limit})"
    )]
    LimitExceeded {
        product: Product,
        side: Side,
        total: i64,
        capacity: i64,
        position: i64,
        limit: i64,
    },

    /// An order was filed under a different product key
    #[error("order for {found} filed under {expected}")]
    WrongProduct { expected: Product, found: Product },
}

/// Errors decoding or encoding the rolling history blob
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to encode rolling history: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode rolling history: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Invalid engine configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("position limit for {product} must be positive, got {limit}")]
    NonPositiveLimit { product: Product, limit: i64 },

    #[error("{name} must be at least 1, got {value}")]
    TooSmall { name: &'static str, value: i64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be a positive finite price, got {value}")]
    InvalidPrice { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_exceeded_message() {
        let err = InvariantViolation::LimitExceeded {
            product: Product::Jam,
            side: Side::Buy,
            total: 400,
            capacity: 350,
            position: 0,
            limit: 350,
        };
        let msg = err.to_string();
        assert!(msg.contains("JAM"));
        assert!(msg.contains("BUY"));
        assert!(msg.contains("400"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::TooSmall {
            name: "squid_ink.window",
            value: 0,
        };
        assert_eq!(err.to_string(), "squid_ink.window must be at least 1, got 0");
    }
}
