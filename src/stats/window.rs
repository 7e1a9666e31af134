//! Rolling window of recent response latencies.

use std::collections::VecDeque;

/// Samples kept by default
pub const DEFAULT_WINDOW: usize = 10;

/// FIFO buffer of the most recent latency samples, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseWindow {
    samples: VecDeque<u64>,
    capacity: usize,
}

impl ResponseWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build from persisted samples, keeping only the newest `capacity`.
    pub fn from_samples(samples: impl IntoIterator<Item = u64>, capacity: usize) -> Self {
        let mut window = Self::new(capacity);
        for sample in samples {
            window.push(sample);
        }
        window
    }

    /// Add a sample, evicting the oldest if at capacity
    pub fn push(&mut self, latency_ms: u64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(latency_ms);
    }

    /// Arithmetic mean rounded to the nearest millisecond; `None` when empty.
    pub fn mean(&self) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u128 = self.samples.iter().map(|&s| s as u128).sum();
        let mean = sum as f64 / self.samples.len() as f64;
        Some(mean.round() as u64)
    }

    /// Samples oldest first
    pub fn to_vec(&self) -> Vec<u64> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for ResponseWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
