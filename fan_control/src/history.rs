//! Fixed-capacity rolling sample history.

use std::collections::VecDeque;

/// Rolling window of the most recent samples.
///
/// Index 0 is the oldest sample. Once `capacity` samples are held, each
/// append evicts the oldest one first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> HistoryBuffer<T> {
    /// Create an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn append(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.samples.iter().copied()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<T> {
        self.samples.back().copied()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` before the first append.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples copied out in chronological order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl HistoryBuffer<f64> {
    /// `(min, max)` of the samples, `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
