use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Dashboard
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health_check))

        // Map
        .route("/api/v1/render", post(handlers::handle_render))
        .route("/api/v1/export", post(handlers::handle_export))

        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
