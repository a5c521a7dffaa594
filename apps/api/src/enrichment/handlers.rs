use axum::{extract::State, Json};

use crate::enrichment::models::{
    AnalysisRequest, EnrichmentOutcome, EnrichmentRequest, TranscriptionRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/enrichment/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<EnrichmentOutcome>, AppError> {
    let outcome = state
        .enrichment
        .run(EnrichmentRequest::Analysis(req))
        .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/enrichment/transcription
pub async fn handle_transcription(
    State(state): State<AppState>,
    Json(req): Json<TranscriptionRequest>,
) -> Result<Json<EnrichmentOutcome>, AppError> {
    let outcome = state
        .enrichment
        .run(EnrichmentRequest::Transcription(req))
        .await?;
    Ok(Json(outcome))
}
