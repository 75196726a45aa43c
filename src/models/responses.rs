//! Response DTOs for the sequence server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::sequence::SequenceStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current cursor position
    pub index: u64,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Configured cache capacity
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Misses repaired from cached neighbours
    pub local_recoveries: u64,
    /// Misses repaired by replaying from index 0
    pub full_rebuilds: u64,
}

impl From<SequenceStats> for StatsResponse {
    fn from(stats: SequenceStats) -> Self {
        Self {
            index: stats.index,
            hits: stats.cache.hits,
            misses: stats.cache.misses,
            evictions: stats.cache.evictions,
            total_entries: stats.cache.total_entries,
            capacity: stats.cache.capacity,
            hit_rate: stats.cache.hit_rate(),
            local_recoveries: stats.local_recoveries,
            full_rebuilds: stats.full_rebuilds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
