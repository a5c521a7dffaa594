//! Data model for the enrichment pipeline. Everything here is transient —
//! scoped to one request's lifetime, never persisted by this service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An enrichment work item, as received from the HTTP layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnrichmentRequest {
    Transcription(TranscriptionRequest),
    Analysis(AnalysisRequest),
}

/// Audio to transcribe: exactly one of the two sources must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionRequest {
    pub audio_base64: Option<String>,
    pub audio_url: Option<String>,
}

/// Resume-vs-job comparison. All three fields must be non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_requirements: String,
    pub job_title: String,
}

impl EnrichmentRequest {
    /// Shape validation, run before any remote call is made.
    pub fn validate(&self) -> Result<(), EnrichmentError> {
        match self {
            EnrichmentRequest::Transcription(req) => match (&req.audio_base64, &req.audio_url) {
                (None, None) => Err(EnrichmentError::Validation(
                    "either audio_base64 or audio_url is required".to_string(),
                )),
                (Some(_), Some(_)) => Err(EnrichmentError::Validation(
                    "audio_base64 and audio_url are mutually exclusive".to_string(),
                )),
                _ => Ok(()),
            },
            EnrichmentRequest::Analysis(req) => {
                for (field, value) in [
                    ("resume_text", &req.resume_text),
                    ("job_requirements", &req.job_requirements),
                    ("job_title", &req.job_title),
                ] {
                    if value.trim().is_empty() {
                        return Err(EnrichmentError::Validation(format!(
                            "{field} must not be empty"
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// A match score: an integer percentage, or `"N/A"` when the remote model
/// did not produce a usable number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchScore {
    Percent(u8),
    Unavailable(String),
}

impl MatchScore {
    pub fn unavailable() -> Self {
        MatchScore::Unavailable("N/A".to_string())
    }

    /// Clamps into [0, 100]. Remote models occasionally hallucinate
    /// percentages outside the natural range.
    pub fn clamped(raw: f64) -> Self {
        MatchScore::Percent(raw.clamp(0.0, 100.0).round() as u8)
    }
}

/// Structured result of a resume analysis.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_score: MatchScore,
    pub skills: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub assessment: String,
}

/// One word in the transcript timeline. Times are milliseconds from the
/// start of the audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordTiming {
    pub text: String,
    pub start: u64,
    pub end: u64,
    pub confidence: f64,
}

/// One speaker-attributed utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub text: String,
    pub start: u64,
    pub end: u64,
}

/// Structured result of a transcription.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResult {
    pub text: String,
    pub words: Vec<WordTiming>,
    pub utterances: Vec<SpeakerTurn>,
}

/// The successful half of the uniform outcome returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnrichmentOutcome {
    Match(MatchResult),
    Transcript(TranscriptResult),
}

/// The typed failure half. Every failure path of the pipeline maps to one
/// of these four kinds — the caller never sees a raw transport error or an
/// unparsed remote payload.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("remote job failed: {0}")]
    RemoteFailure(String),

    #[error("job still pending after {attempts} poll attempts")]
    TimedOut { attempts: u32 },
}

impl EnrichmentError {
    /// Stable machine-readable kind, used in HTTP error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EnrichmentError::Validation(_) => "VALIDATION_ERROR",
            EnrichmentError::Submission(_) => "SUBMISSION_ERROR",
            EnrichmentError::RemoteFailure(_) => "REMOTE_FAILURE",
            EnrichmentError::TimedOut { .. } => "TIMED_OUT",
        }
    }
}
