//! Enrichment service — the single entry point for the pipeline.
//!
//! Dispatches a validated request to the matching remote client and reducer,
//! runs the polling orchestrator, and maps every terminal state to the
//! uniform outcome. Callers receive either a usable (possibly degraded)
//! result or a typed `EnrichmentError` — never a raw transport error or an
//! unparsed remote payload.

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use tracing::warn;

use crate::enrichment::models::{
    AnalysisRequest, EnrichmentError, EnrichmentOutcome, EnrichmentRequest, TranscriptionRequest,
};
use crate::enrichment::orchestrator::{
    run_job, JobOutcome, ANALYSIS_POLL_POLICY, TRANSCRIPTION_POLL_POLICY,
};
use crate::enrichment::reducer::{reduce_analysis, reduce_transcript};
use crate::remote::analysis::{AnalysisClient, AnalysisInput};
use crate::remote::transcription::{AudioSource, TranscriptionClient};

pub struct EnrichmentService {
    transcription: TranscriptionClient,
    analysis: AnalysisClient,
}

impl EnrichmentService {
    pub fn new(transcription: TranscriptionClient, analysis: AnalysisClient) -> Self {
        Self {
            transcription,
            analysis,
        }
    }

    /// Runs one enrichment request end to end. Validates the request shape
    /// first and fails fast, before any remote call is made.
    pub async fn run(
        &self,
        request: EnrichmentRequest,
    ) -> Result<EnrichmentOutcome, EnrichmentError> {
        request.validate()?;

        match request {
            EnrichmentRequest::Analysis(req) => self.run_analysis(req).await,
            EnrichmentRequest::Transcription(req) => self.run_transcription(req).await,
        }
    }

    async fn run_analysis(
        &self,
        req: AnalysisRequest,
    ) -> Result<EnrichmentOutcome, EnrichmentError> {
        let input = AnalysisInput {
            resume_text: req.resume_text,
            job_requirements: req.job_requirements,
            job_title: req.job_title,
        };

        match run_job(&self.analysis, &input, &ANALYSIS_POLL_POLICY).await {
            JobOutcome::Completed(payload) => {
                let raw_text = payload.as_str().unwrap_or_default();
                let reduction = reduce_analysis(raw_text);
                if reduction.is_degraded() {
                    warn!("analysis output was not valid JSON; returning degraded result");
                }
                Ok(EnrichmentOutcome::Match(reduction.into_inner()))
            }
            JobOutcome::SubmitFailed(e) => Err(EnrichmentError::Submission(e.to_string())),
            JobOutcome::RemoteFailed(reason) => Err(EnrichmentError::RemoteFailure(reason)),
            JobOutcome::TimedOut { attempts } => Err(EnrichmentError::TimedOut { attempts }),
        }
    }

    async fn run_transcription(
        &self,
        req: TranscriptionRequest,
    ) -> Result<EnrichmentOutcome, EnrichmentError> {
        let input = audio_source(&req)?;

        match run_job(&self.transcription, &input, &TRANSCRIPTION_POLL_POLICY).await {
            JobOutcome::Completed(payload) => {
                Ok(EnrichmentOutcome::Transcript(reduce_transcript(&payload)))
            }
            JobOutcome::SubmitFailed(e) => Err(EnrichmentError::Submission(e.to_string())),
            JobOutcome::RemoteFailed(reason) => Err(EnrichmentError::RemoteFailure(reason)),
            JobOutcome::TimedOut { attempts } => Err(EnrichmentError::TimedOut { attempts }),
        }
    }
}

/// Resolves the validated request into an audio source, decoding inline
/// base64 payloads. A payload that does not decode is the caller's fault.
fn audio_source(req: &TranscriptionRequest) -> Result<AudioSource, EnrichmentError> {
    if let Some(encoded) = &req.audio_base64 {
        let decoded = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| EnrichmentError::Validation(format!("audio_base64 is not valid base64: {e}")))?;
        return Ok(AudioSource::Bytes(Bytes::from(decoded)));
    }
    // validate() guarantees audio_url is present when audio_base64 is not.
    let url = req.audio_url.clone().unwrap_or_default();
    Ok(AudioSource::Url(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::models::TranscriptionRequest;
    use reqwest::Client;

    fn service() -> EnrichmentService {
        let http = Client::new();
        EnrichmentService::new(
            TranscriptionClient::new(http.clone(), "test-key".to_string()),
            AnalysisClient::new(http, "test-key".to_string()),
        )
    }

    #[tokio::test]
    async fn test_invalid_transcription_request_fails_before_any_remote_call() {
        let outcome = service()
            .run(EnrichmentRequest::Transcription(
                TranscriptionRequest::default(),
            ))
            .await;
        assert!(matches!(outcome, Err(EnrichmentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_analysis_fields_fail_fast() {
        let outcome = service()
            .run(EnrichmentRequest::Analysis(AnalysisRequest {
                resume_text: String::new(),
                job_requirements: "Rust".to_string(),
                job_title: "Engineer".to_string(),
            }))
            .await;
        assert!(matches!(outcome, Err(EnrichmentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_undecodable_base64_is_a_validation_error() {
        let outcome = service()
            .run(EnrichmentRequest::Transcription(TranscriptionRequest {
                audio_base64: Some("not base64 at all!!!".to_string()),
                audio_url: None,
            }))
            .await;
        assert!(matches!(outcome, Err(EnrichmentError::Validation(_))));
    }

    #[test]
    fn test_audio_source_prefers_decoded_bytes() {
        let req = TranscriptionRequest {
            audio_base64: Some(general_purpose::STANDARD.encode(b"RIFF")),
            audio_url: None,
        };
        match audio_source(&req).unwrap() {
            AudioSource::Bytes(bytes) => assert_eq!(&bytes[..], b"RIFF"),
            other => panic!("expected Bytes, got {other:?}"),
        }
    }

    #[test]
    fn test_audio_source_passes_url_through() {
        let req = TranscriptionRequest {
            audio_base64: None,
            audio_url: Some("https://cdn.example.com/interview.wav".to_string()),
        };
        match audio_source(&req).unwrap() {
            AudioSource::Url(url) => assert_eq!(url, "https://cdn.example.com/interview.wav"),
            other => panic!("expected Url, got {other:?}"),
        }
    }
}
