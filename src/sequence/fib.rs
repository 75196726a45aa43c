//! Fibonacci Cursor Module
//!
//! Cursor over the Fibonacci sequence backed by a bounded cache. Any value the
//! cache has dropped is recomputed from cached neighbours, or failing that by
//! replaying the recurrence from index 0.

use num_bigint::BigUint;
use num_traits::{CheckedSub, One, Zero};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{BoundedCache, CacheStats, MIN_CAPACITY};
use crate::error::{Result, SequenceError};

/// Which pair of neighbours to try first when recomputing a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighbours {
    /// `i-1` and `i-2`, forward recurrence
    Lower,
    /// `i+1` and `i+2`, inverse recurrence
    Upper,
}

// == Sequence Stats ==
/// Snapshot of cursor position plus cache and recovery counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceStats {
    pub index: u64,
    pub cache: CacheStats,
    /// Misses repaired from two cached neighbours
    pub local_recoveries: u64,
    /// Misses that required replaying the sequence from index 0
    pub full_rebuilds: u64,
}

// == Fib Sequence ==
/// Cursor state and bounded cache. Not synchronized; see `SequenceStore`.
#[derive(Debug)]
pub struct FibSequence {
    /// Current cursor position
    index: u64,
    cache: BoundedCache,
    local_recoveries: u64,
    full_rebuilds: u64,
}

impl FibSequence {
    // == Constructor ==
    /// Creates a cursor at index 0 with seeds 0 and 1 cached.
    ///
    /// Fails with `InvalidCapacity` when `capacity` cannot hold both seeds.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < MIN_CAPACITY {
            return Err(SequenceError::InvalidCapacity(capacity));
        }

        let mut cache = BoundedCache::new(capacity);
        cache.insert(0, BigUint::zero());
        cache.insert(1, BigUint::one());

        Ok(Self {
            index: 0,
            cache,
            local_recoveries: 0,
            full_rebuilds: 0,
        })
    }

    /// Creates a cursor positioned at a previously recovered `index`,
    /// filling the cache on the way up.
    pub fn with_cursor(capacity: usize, index: u64) -> Result<Self> {
        let mut sequence = Self::new(capacity)?;

        if index >= 2 {
            sequence.rebuild_to(index);
            if !sequence.cache.contains(index) {
                return Err(SequenceError::RebuildInconsistency(index));
            }
        }

        sequence.index = index;
        Ok(sequence)
    }

    // == Advance ==
    /// Moves the cursor forward one step and returns the new current value.
    pub fn advance(&mut self) -> Result<BigUint> {
        let target = self
            .index
            .checked_add(1)
            .ok_or(SequenceError::IndexOverflow(self.index))?;

        let value = if target == 1 {
            self.lookup(1)?
        } else {
            match self.cache.get(target) {
                Ok(value) => value,
                Err(SequenceError::CacheMiss(_)) => {
                    let last = self.lookup(self.index)?;
                    let before_last = self.lookup(self.index - 1)?;
                    let sum = last + before_last;
                    self.cache.insert(target, sum.clone());
                    sum
                }
                Err(err) => return Err(err),
            }
        };

        self.index = target;
        Ok(value)
    }

    // == Current ==
    /// Returns the value under the cursor without moving it.
    pub fn current(&mut self) -> Result<BigUint> {
        self.lookup(self.index)
    }

    // == Retreat ==
    /// Moves the cursor back one step and returns the new current value.
    ///
    /// At index 0 the cursor stays put and the value at 0 is returned.
    pub fn retreat(&mut self) -> Result<BigUint> {
        if self.index == 0 {
            return self.lookup(0);
        }

        let target = self.index - 1;
        let value = match self.cache.get(target) {
            Ok(value) => value,
            Err(SequenceError::CacheMiss(_)) => self.recover(target, Neighbours::Upper)?,
            Err(err) => return Err(err),
        };

        self.index = target;
        Ok(value)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// Drops every cached entry except the two seeds.
    ///
    /// Returns the number of entries removed.
    pub fn evict_except_seeds(&mut self) -> usize {
        self.cache.retain(|index| index < 2)
    }

    pub fn stats(&self) -> SequenceStats {
        SequenceStats {
            index: self.index,
            cache: self.cache.stats(),
            local_recoveries: self.local_recoveries,
            full_rebuilds: self.full_rebuilds,
        }
    }

    // == Recovery-Aware Lookup ==
    fn lookup(&mut self, index: u64) -> Result<BigUint> {
        match self.cache.get(index) {
            Err(SequenceError::CacheMiss(_)) => self.recover(index, Neighbours::Lower),
            other => other,
        }
    }

    /// Recomputes a value known to be missing from the cache and re-inserts it.
    fn recover(&mut self, index: u64, prefer: Neighbours) -> Result<BigUint> {
        if let Some(seed) = seed_value(index) {
            debug!(index, "restoring evicted seed");
            self.cache.insert(index, seed.clone());
            return Ok(seed);
        }

        let local = match prefer {
            Neighbours::Lower => self
                .from_lower_neighbours(index)
                .or_else(|| self.from_upper_neighbours(index)),
            Neighbours::Upper => self
                .from_upper_neighbours(index)
                .or_else(|| self.from_lower_neighbours(index)),
        };

        if let Some(value) = local {
            debug!(index, "recomputed evicted entry from cached neighbours");
            self.local_recoveries += 1;
            self.cache.insert(index, value.clone());
            return Ok(value);
        }

        warn!(
            index,
            cursor = self.index,
            "neighbours evicted, rebuilding sequence from index 0"
        );
        self.rebuild_to(index);

        self.cache
            .get(index)
            .map_err(|_| SequenceError::RebuildInconsistency(index))
    }

    fn from_lower_neighbours(&mut self, index: u64) -> Option<BigUint> {
        if index < 2 || !self.cache.contains(index - 1) || !self.cache.contains(index - 2) {
            return None;
        }

        let last = self.cache.get(index - 1).ok()?;
        let before_last = self.cache.get(index - 2).ok()?;
        Some(last + before_last)
    }

    fn from_upper_neighbours(&mut self, index: u64) -> Option<BigUint> {
        let next = index.checked_add(1)?;
        let after_next = index.checked_add(2)?;
        if !self.cache.contains(next) || !self.cache.contains(after_next) {
            return None;
        }

        let upper = self.cache.get(after_next).ok()?;
        let lower = self.cache.get(next).ok()?;
        upper.checked_sub(&lower)
    }

    // == Full Rebuild ==
    /// Replays the recurrence from index 0 through `target`, inserting every value.
    ///
    /// Earlier values are evicted as the cache fills; the last `capacity`
    /// indices up to `target` remain cached afterwards.
    fn rebuild_to(&mut self, target: u64) {
        self.full_rebuilds += 1;

        let mut previous = BigUint::zero();
        let mut current = BigUint::one();
        self.cache.insert(0, previous.clone());
        if target == 0 {
            return;
        }
        self.cache.insert(1, current.clone());

        for index in 2..=target {
            let next = &previous + &current;
            previous = std::mem::replace(&mut current, next);
            self.cache.insert(index, current.clone());
        }
    }
}

fn seed_value(index: u64) -> Option<BigUint> {
    match index {
        0 => Some(BigUint::zero()),
        1 => Some(BigUint::one()),
        _ => None,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    const FIRST: [u64; 13] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

    #[test]
    fn test_new_rejects_small_capacity() {
        assert_eq!(
            FibSequence::new(0).unwrap_err(),
            SequenceError::InvalidCapacity(0)
        );
        assert_eq!(
            FibSequence::new(1).unwrap_err(),
            SequenceError::InvalidCapacity(1)
        );
        assert!(FibSequence::new(2).is_ok());
    }

    #[test]
    fn test_new_starts_at_zero() {
        let mut seq = FibSequence::new(20).unwrap();
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.current().unwrap(), BigUint::zero());
        assert_eq!(seq.stats().cache.total_entries, 2);
    }

    #[test]
    fn test_advance_produces_sequence() {
        let mut seq = FibSequence::new(20).unwrap();

        for (n, expected) in FIRST.iter().enumerate().skip(1) {
            let value = seq.advance().unwrap();
            assert_eq!(value, BigUint::from(*expected), "advance #{}", n);
            assert_eq!(seq.index(), n as u64);
        }
    }

    #[test]
    fn test_current_is_idempotent() {
        let mut seq = FibSequence::new(20).unwrap();
        for _ in 0..7 {
            seq.advance().unwrap();
        }

        for _ in 0..5 {
            assert_eq!(seq.current().unwrap(), BigUint::from(13u32));
            assert_eq!(seq.index(), 7);
        }
    }

    #[test]
    fn test_retreat_walks_back_to_zero() {
        let mut seq = FibSequence::with_cursor(20, 12).unwrap();

        for expected in FIRST.iter().rev().skip(1) {
            assert_eq!(seq.retreat().unwrap(), BigUint::from(*expected));
        }
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn test_retreat_at_zero_stays_at_zero() {
        let mut seq = FibSequence::new(2).unwrap();

        assert_eq!(seq.retreat().unwrap(), BigUint::zero());
        assert_eq!(seq.retreat().unwrap(), BigUint::zero());
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn test_advance_then_retreat_restores_start() {
        let mut seq = FibSequence::new(3).unwrap();

        for _ in 0..40 {
            seq.advance().unwrap();
        }
        for _ in 0..40 {
            seq.retreat().unwrap();
        }

        assert_eq!(seq.index(), 0);
        assert_eq!(seq.current().unwrap(), BigUint::zero());
        assert_eq!(seq.advance().unwrap(), BigUint::one());
    }

    #[test]
    fn test_with_cursor_known_values() {
        let cases = [
            (0, "0"),
            (1, "1"),
            (2, "1"),
            (5, "5"),
            (10, "55"),
            (25, "75025"),
            (50, "12586269025"),
            (100, "354224848179261915075"),
            (300, "222232244629420445529739893461909967206666939096499764990979600"),
            (500, "139423224561697880139724382870407283950070256587697307264108962948325571622863290691557658876222521294125"),
        ];

        for (index, expected) in cases {
            let mut seq = FibSequence::with_cursor(5, index).unwrap();
            assert_eq!(seq.index(), index);
            assert_eq!(seq.current().unwrap(), big(expected), "index {}", index);
        }
    }

    #[test]
    fn test_with_cursor_then_advance() {
        let mut seq = FibSequence::with_cursor(2, 99).unwrap();
        assert_eq!(seq.advance().unwrap(), big("354224848179261915075"));
        assert_eq!(seq.index(), 100);
    }

    #[test]
    fn test_evicted_seed_is_restored() {
        let mut seq = FibSequence::new(2).unwrap();
        seq.cache.retain(|_| false);

        assert_eq!(seq.advance().unwrap(), BigUint::one());
        assert_eq!(seq.retreat().unwrap(), BigUint::zero());
        assert_eq!(seq.stats().full_rebuilds, 0);
    }

    #[test]
    fn test_current_after_evicting_all_but_seeds_rebuilds() {
        let mut seq = FibSequence::new(10).unwrap();
        for _ in 0..100 {
            seq.advance().unwrap();
        }
        let before = seq.current().unwrap();

        // Only indices 91..=100 are still cached; the seeds went long ago
        let removed = seq.evict_except_seeds();
        assert_eq!(removed, 10);

        assert_eq!(seq.current().unwrap(), before);
        assert_eq!(seq.index(), 100);
        assert_eq!(seq.stats().full_rebuilds, 1);
    }

    #[test]
    fn test_local_recovery_from_lower_neighbours() {
        let mut seq = FibSequence::new(20).unwrap();
        for _ in 0..10 {
            seq.advance().unwrap();
        }
        seq.cache.retain(|index| index != 10);

        assert_eq!(seq.current().unwrap(), BigUint::from(55u32));
        let stats = seq.stats();
        assert_eq!(stats.local_recoveries, 1);
        assert_eq!(stats.full_rebuilds, 0);
    }

    #[test]
    fn test_retreat_recovers_from_upper_neighbours() {
        let mut seq = FibSequence::new(20).unwrap();
        for _ in 0..12 {
            seq.advance().unwrap();
        }
        for _ in 0..2 {
            seq.retreat().unwrap();
        }
        // Cursor at 10; drop 9 and everything below it
        seq.cache.retain(|index| index >= 10);

        assert_eq!(seq.retreat().unwrap(), BigUint::from(34u32));
        assert_eq!(seq.index(), 9);
        let stats = seq.stats();
        assert_eq!(stats.local_recoveries, 1);
        assert_eq!(stats.full_rebuilds, 0);
    }

    #[test]
    fn test_retreat_falls_back_to_rebuild() {
        let mut seq = FibSequence::new(20).unwrap();
        for _ in 0..30 {
            seq.advance().unwrap();
        }
        // Only the cursor itself and the seeds survive
        seq.cache.retain(|index| index == 30 || index < 2);

        assert_eq!(seq.retreat().unwrap(), BigUint::from(514229u32));
        assert_eq!(seq.index(), 29);
        assert_eq!(seq.stats().full_rebuilds, 1);
    }

    #[test]
    fn test_advance_with_both_predecessors_evicted() {
        let mut seq = FibSequence::new(20).unwrap();
        for _ in 0..15 {
            seq.advance().unwrap();
        }
        seq.evict_except_seeds();

        assert_eq!(seq.advance().unwrap(), BigUint::from(987u32));
        assert_eq!(seq.index(), 16);
    }

    #[test]
    fn test_advance_at_max_index_errors_without_moving() {
        let mut seq = FibSequence::new(2).unwrap();
        seq.index = u64::MAX;

        assert_eq!(
            seq.advance().unwrap_err(),
            SequenceError::IndexOverflow(u64::MAX)
        );
        assert_eq!(seq.index(), u64::MAX);
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut seq = FibSequence::new(4).unwrap();
        for _ in 0..200 {
            seq.advance().unwrap();
            assert!(seq.stats().cache.total_entries <= 4);
        }
    }
}
