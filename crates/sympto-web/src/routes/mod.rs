//! HTTP routes for the advisory API.

mod api;

pub use api::*;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/stats", get(api::get_stats))
        .route("/api/triage", post(api::triage))
        .route("/api/match", post(api::match_symptoms))
        .route("/api/predict", post(api::predict))
        .route("/api/rank", post(api::rank))
        .route("/api/reload", post(api::reload))
        // CORS for browser front-ends
        .layer(CorsLayer::permissive())
        .with_state(state)
}
