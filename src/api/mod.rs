//! API Module
//!
//! HTTP handlers and routing for the sequence server.
//!
//! # Endpoints
//! - `GET /next` - Advance the cursor, returns the new value
//! - `GET /current` - Value under the cursor
//! - `GET /previous` - Step back, returns the new value
//! - `GET /stats` - Cursor and cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
