//! Rolling history carried across ticks
//!
//! Holds the three bounded sequences the strategies need (KELP fair values,
//! KELP touch VWAP samples, SQUID_INK fair values) and encodes them into the
//! opaque `traderData` blob returned to the simulator every tick.

pub mod window;

pub use window::RollingWindow;

use crate::core::HistoryError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One KELP top-of-book VWAP observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VwapSample {
    pub vol: i64,
    pub vwap: f64,
}

/// Bounded per-product history owned by the trader
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingHistory {
    pub kelp_prices: RollingWindow<f64>,
    pub kelp_vwap: RollingWindow<VwapSample>,
    pub squidink_prices: RollingWindow<f64>,
}

/// Wire shape of the blob; windows are rebuilt with their capacities on decode
#[derive(Debug, Default, Deserialize)]
struct RawHistory {
    #[serde(default)]
    kelp_prices: Vec<f64>,
    #[serde(default)]
    kelp_vwap: Vec<VwapSample>,
    #[serde(default)]
    squidink_prices: Vec<f64>,
}

impl RawHistory {
    /// Entries that will not fit the configured windows
    fn overflow(&self, kelp_window: usize, squid_ink_window: usize) -> usize {
        // Windows bump a zero capacity to one
        let kelp_window = kelp_window.max(1);
        let squid_ink_window = squid_ink_window.max(1);

        self.kelp_prices.len().saturating_sub(kelp_window)
            + self.kelp_vwap.len().saturating_sub(kelp_window)
            + self.squidink_prices.len().saturating_sub(squid_ink_window)
    }
}

impl RollingHistory {
    pub fn new(kelp_window: usize, squid_ink_window: usize) -> Self {
        Self {
            kelp_prices: RollingWindow::new(kelp_window),
            kelp_vwap: RollingWindow::new(kelp_window),
            squidink_prices: RollingWindow::new(squid_ink_window),
        }
    }

    /// Record a KELP tick
    pub fn record_kelp(&mut self, fair_value: f64, sample: VwapSample) {
        self.kelp_prices.push(fair_value);
        self.kelp_vwap.push(sample);
    }

    pub fn is_empty(&self) -> bool {
        self.kelp_prices.is_empty() && self.kelp_vwap.is_empty() && self.squidink_prices.is_empty()
    }

    /// Serialize to the `traderData` blob
    pub fn encode(&self) -> Result<String, HistoryError> {
        serde_json::to_string(self).map_err(HistoryError::Encode)
    }

    /// Rebuild from a blob produced by [`RollingHistory::encode`]
    ///
    /// Sequences longer than the configured windows keep their newest entries.
    pub fn decode(
        blob: &str,
        kelp_window: usize,
        squid_ink_window: usize,
    ) -> Result<Self, HistoryError> {
        let raw: RawHistory = serde_json::from_str(blob).map_err(HistoryError::Decode)?;
        let dropped = raw.overflow(kelp_window, squid_ink_window);
        if dropped > 0 {
            debug!(dropped, "Decoded history longer than its windows, keeping newest");
        }

        let mut history = Self::new(kelp_window, squid_ink_window);
        history.kelp_prices.extend(raw.kelp_prices);
        history.kelp_vwap.extend(raw.kelp_vwap);
        history.squidink_prices.extend(raw.squidink_prices);
        Ok(history)
    }
}
