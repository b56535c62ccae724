//! Fixed-capacity FIFO window
//!
//! Pushing onto a full window evicts the oldest element first, so the
//! length never exceeds the capacity.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create an empty window
    ///
    /// A capacity of 0 is bumped to 1; config validation rejects it earlier.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest if full
    ///
    /// Returns the evicted value, if any.
    #[inline]
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent value
    #[inline]
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest-first iterator
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.items.iter()
    }
}

impl<T> Extend<T> for RollingWindow<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl RollingWindow<f64> {
    /// Mean and population standard deviation of the window
    ///
    /// An empty window yields `(0.0, 0.0)`.
    pub fn mean_std(&self) -> (f64, f64) {
        if self.items.is_empty() {
            return (0.0, 0.0);
        }

        let n = self.items.len() as f64;
        let mean = self.items.iter().sum::<f64>() / n;
        let variance = self
            .items
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum::<f64>()
            / n;

        (mean, variance.sqrt())
    }
}

impl<T: Serialize> Serialize for RollingWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
