//! API Handlers
//!
//! HTTP request handlers for each sequence server endpoint.

use axum::{extract::State, Json};
use tracing::error;

use crate::config::Config;
use crate::error::{Result, SequenceError};
use crate::models::{HealthResponse, StatsResponse};
use crate::sequence::SequenceStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lock-guarded cursor and cache
    pub store: SequenceStore,
}

impl AppState {
    pub fn new(store: SequenceStore) -> Self {
        Self { store }
    }

    /// Creates a new AppState from configuration, resuming at `index`.
    pub fn from_config(config: &Config, index: u64) -> Result<Self> {
        Ok(Self::new(SequenceStore::resume(config.cache_capacity, index)?))
    }
}

fn log_failure(operation: &str, err: SequenceError) -> SequenceError {
    error!(operation, error = %err, "sequence operation failed");
    err
}

/// Handler for GET /next
///
/// Advances the cursor and returns the new value as decimal text.
pub async fn next_handler(State(state): State<AppState>) -> Result<String> {
    let value = state
        .store
        .advance()
        .await
        .map_err(|err| log_failure("next", err))?;
    Ok(value.to_string())
}

/// Handler for GET /current
///
/// Returns the value under the cursor as decimal text.
pub async fn current_handler(State(state): State<AppState>) -> Result<String> {
    let value = state
        .store
        .current()
        .await
        .map_err(|err| log_failure("current", err))?;
    Ok(value.to_string())
}

/// Handler for GET /previous
///
/// Moves the cursor back (never below 0) and returns the value as decimal text.
pub async fn previous_handler(State(state): State<AppState>) -> Result<String> {
    let value = state
        .store
        .retreat()
        .await
        .map_err(|err| log_failure("previous", err))?;
    Ok(value.to_string())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(SequenceStore::with_capacity(10).unwrap())
    }

    #[tokio::test]
    async fn test_next_current_previous() {
        let state = test_state();

        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(next_handler(State(state.clone())).await.unwrap());
        }
        assert_eq!(seen, ["1", "1", "2", "3", "5", "8"]);

        assert_eq!(current_handler(State(state.clone())).await.unwrap(), "8");
        assert_eq!(previous_handler(State(state.clone())).await.unwrap(), "5");
        assert_eq!(current_handler(State(state)).await.unwrap(), "5");
    }

    #[tokio::test]
    async fn test_previous_at_zero() {
        let state = test_state();

        assert_eq!(previous_handler(State(state.clone())).await.unwrap(), "0");
        assert_eq!(state.store.index().await, 0);
    }

    #[tokio::test]
    async fn test_from_config_resumes() {
        let config = Config {
            cache_capacity: 4,
            ..Config::default()
        };
        let state = AppState::from_config(&config, 10).unwrap();

        assert_eq!(current_handler(State(state.clone())).await.unwrap(), "55");
        assert_eq!(next_handler(State(state)).await.unwrap(), "89");
    }

    #[tokio::test]
    async fn test_from_config_rejects_tiny_cache() {
        let config = Config {
            cache_capacity: 1,
            ..Config::default()
        };
        assert!(AppState::from_config(&config, 0).is_err());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        next_handler(State(state.clone())).await.unwrap();
        next_handler(State(state.clone())).await.unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.index, 2);
        assert_eq!(response.capacity, 10);
        assert_eq!(response.full_rebuilds, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
