use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Geometry descriptors
        .route("/gis", post(handlers::gis_info))
        // Spatial joins
        .route("/natura2000", post(handlers::natura_info))
        .route("/soc", post(handlers::soc_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
