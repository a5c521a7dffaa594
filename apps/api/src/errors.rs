use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enrichment::models::EnrichmentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Enrichment(e) => {
                let status = match e {
                    EnrichmentError::Validation(_) => StatusCode::BAD_REQUEST,
                    EnrichmentError::Submission(_) | EnrichmentError::RemoteFailure(_) => {
                        tracing::error!("enrichment failed: {e}");
                        StatusCode::BAD_GATEWAY
                    }
                    EnrichmentError::TimedOut { .. } => {
                        tracing::error!("enrichment timed out: {e}");
                        StatusCode::GATEWAY_TIMEOUT
                    }
                };
                (status, e.kind(), e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
