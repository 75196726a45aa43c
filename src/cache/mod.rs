//! Cache Module
//!
//! Bounded in-memory storage for sequence values with LRU eviction.

mod lru;
mod stats;
mod store;


// Re-export public types
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Smallest capacity that can hold both seed entries
pub const MIN_CAPACITY: usize = 2;
