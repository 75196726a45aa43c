//! Bounded Cache Module
//!
//! Fixed-capacity index -> value map with least-recently-used eviction.

use std::collections::HashMap;

use num_bigint::BigUint;
use tracing::trace;

use crate::cache::{CacheStats, LruTracker};
use crate::error::{Result, SequenceError};

// == Bounded Cache ==
/// Sequence values keyed by index, never holding more than `capacity` entries.
///
/// Both `get` and `insert` count as an access for eviction purposes;
/// `contains` does not.
#[derive(Debug)]
pub struct BoundedCache {
    /// Index -> value storage
    entries: HashMap<u64, BigUint>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl BoundedCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(4096)),
            lru: LruTracker::new(),
            stats: CacheStats::with_capacity(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Returns a copy of the value at `index` and marks it most recently used.
    ///
    /// A missing index yields `SequenceError::CacheMiss`.
    pub fn get(&mut self, index: u64) -> Result<BigUint> {
        match self.entries.get(&index) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                self.lru.touch(index);
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(SequenceError::CacheMiss(index))
            }
        }
    }

    // == Contains ==
    /// Checks presence without touching recency or counters.
    pub fn contains(&self, index: u64) -> bool {
        self.entries.contains_key(&index)
    }

    // == Insert ==
    /// Stores `value` at `index`, evicting least recently used entries as needed.
    pub fn insert(&mut self, index: u64, value: BigUint) {
        if self.capacity == 0 {
            return;
        }

        if !self.entries.contains_key(&index) {
            while self.entries.len() >= self.capacity {
                let Some(evicted) = self.lru.evict_oldest() else {
                    break;
                };
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                trace!(index = evicted, "evicted sequence entry");
            }
        }

        self.entries.insert(index, value);
        self.lru.touch(index);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Retain ==
    /// Keeps only indices for which `keep` returns true.
    ///
    /// Returns the number of entries removed. Removals are not counted as evictions.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(u64) -> bool,
    {
        let dropped: Vec<u64> = self.entries.keys().copied().filter(|i| !keep(*i)).collect();

        for index in &dropped {
            self.entries.remove(index);
            self.lru.remove(*index);
        }

        self.stats.set_total_entries(self.entries.len());
        dropped.len()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
