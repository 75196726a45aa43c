//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order of sequence indices for LRU eviction.
///
/// Every touch stamps the index with a monotonically increasing tick:
/// - `stamps` maps index -> its latest tick
/// - `order` maps tick -> index, so the first entry is the least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Next tick to hand out
    tick: u64,
    /// Latest tick per index
    stamps: HashMap<u64, u64>,
    /// Indices ordered by last access
    order: BTreeMap<u64, u64>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks an index as most recently used.
    pub fn touch(&mut self, index: u64) {
        if let Some(previous) = self.stamps.insert(index, self.tick) {
            self.order.remove(&previous);
        }
        self.order.insert(self.tick, index);
        self.tick += 1;
    }

    // == Remove ==
    /// Stops tracking an index. Unknown indices are ignored.
    pub fn remove(&mut self, index: u64) {
        if let Some(stamp) = self.stamps.remove(&index) {
            self.order.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used index.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<u64> {
        let (_, index) = self.order.pop_first()?;
        self.stamps.remove(&index);
        Some(index)
    }

    // == Peek Oldest ==
    /// Returns the least recently used index without removing it.
    pub fn peek_oldest(&self) -> Option<u64> {
        self.order.first_key_value().map(|(_, index)| *index)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    // == Contains ==
    pub fn contains(&self, index: u64) -> bool {
        self.stamps.contains_key(&index)
    }
}
