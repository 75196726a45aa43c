//! API Routes
//!
//! Configures the Axum router with all sequence server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    current_handler, health_handler, next_handler, previous_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /next` - Advance the cursor
/// - `GET /current` - Read the value under the cursor
/// - `GET /previous` - Step the cursor back
/// - `GET /stats` - Cursor, cache and recovery counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/next", get(next_handler))
        .route("/current", get(current_handler))
        .route("/previous", get(previous_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
