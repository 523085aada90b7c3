//! Prediction window - trailing buffer of per-frame probabilities

use std::collections::VecDeque;

/// Bounded FIFO of the most recent probabilities.
///
/// Once full, each push evicts the oldest value: a sliding window, not a
/// buffer that resets when it fills.
#[derive(Debug, Clone)]
pub struct PredictionWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl PredictionWindow {
    /// Create an empty window. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a probability, evicting the oldest when full
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Mean of the current contents, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Contents, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }
}
