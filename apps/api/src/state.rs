use std::sync::Arc;

use crate::enrichment::service::EnrichmentService;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is process-wide, read-only; no request mutates shared state.
#[derive(Clone)]
pub struct AppState {
    pub enrichment: Arc<EnrichmentService>,
}
