//! Response models for the sequence server API
//!
//! JSON bodies for the auxiliary endpoints. The cursor endpoints answer with
//! plain decimal text and need no DTO.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
