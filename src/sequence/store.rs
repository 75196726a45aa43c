//! Sequence Store Module
//!
//! Shareable handle that serializes every cursor operation behind one lock.

use std::sync::Arc;

use num_bigint::BigUint;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::sequence::{FibSequence, SequenceStats};

// == Sequence Store ==
/// Thread-safe wrapper around a `FibSequence`.
///
/// Clones share the same cursor and cache. Each method holds the lock for
/// exactly one logical operation, so a concurrent advance and retreat never
/// interleave.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    inner: Arc<Mutex<FibSequence>>,
}

impl SequenceStore {
    pub fn new(sequence: FibSequence) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sequence)),
        }
    }

    /// Creates a store with a fresh cursor at index 0.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::new(FibSequence::new(capacity)?))
    }

    /// Creates a store whose cursor resumes at a recovered index.
    pub fn resume(capacity: usize, index: u64) -> Result<Self> {
        Ok(Self::new(FibSequence::with_cursor(capacity, index)?))
    }

    pub async fn advance(&self) -> Result<BigUint> {
        self.inner.lock().await.advance()
    }

    pub async fn current(&self) -> Result<BigUint> {
        self.inner.lock().await.current()
    }

    pub async fn retreat(&self) -> Result<BigUint> {
        self.inner.lock().await.retreat()
    }

    /// Snapshot of the cursor position.
    pub async fn index(&self) -> u64 {
        self.inner.lock().await.index()
    }

    pub async fn stats(&self) -> SequenceStats {
        self.inner.lock().await.stats()
    }

    pub async fn evict_except_seeds(&self) -> usize {
        self.inner.lock().await.evict_except_seeds()
    }
}
