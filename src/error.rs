//! Error types for the sequence server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Sequence Error Enum ==
/// Errors raised by the cache and the sequence store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Index is not in the cache. Recovered inside the store, never surfaced.
    #[error("Cache miss at index {0}")]
    CacheMiss(u64),

    /// A full rebuild finished but the target index is still absent
    #[error("Rebuild inconsistency: index {0} missing after full rebuild")]
    RebuildInconsistency(u64),

    /// Cursor cannot move past the largest representable index
    #[error("Index overflow: cursor at {0} cannot advance")]
    IndexOverflow(u64),

    /// Cache cannot hold the two seed entries
    #[error("Invalid cache capacity {0}: must be at least 2")]
    InvalidCapacity(usize),
}

// == IntoResponse Implementation ==
impl IntoResponse for SequenceError {
    fn into_response(self) -> Response {
        let status = match &self {
            SequenceError::CacheMiss(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SequenceError::RebuildInconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SequenceError::IndexOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SequenceError::InvalidCapacity(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Persistence Error Enum ==
/// Errors raised while reading or writing the backup file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a non-negative decimal integer
    #[error("corrupt backup content: {0:?}")]
    Corrupt(String),
}

// == Result Type Alias ==
/// Convenience Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SequenceError>;
