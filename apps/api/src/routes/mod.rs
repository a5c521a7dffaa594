pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::enrichment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Enrichment API
        .route(
            "/api/v1/enrichment/analysis",
            post(handlers::handle_analysis),
        )
        .route(
            "/api/v1/enrichment/transcription",
            post(handlers::handle_transcription),
        )
        .with_state(state)
}
