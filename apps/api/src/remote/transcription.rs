//! Voice transcription client — wraps the AssemblyAI v2 transcript API.
//!
//! Submission has two steps when the caller supplies raw audio: upload the
//! bytes to `/upload`, then create the transcript job against the returned
//! URL. Pre-hosted audio skips the upload. The job is then polled by id
//! until AssemblyAI reports `completed` or `error`.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::remote::{JobHandle, JobStatus, PollError, RemoteJobClient, SubmitError, Submission};

const ASSEMBLYAI_UPLOAD_URL: &str = "https://api.assemblyai.com/v2/upload";
const ASSEMBLYAI_TRANSCRIPT_URL: &str = "https://api.assemblyai.com/v2/transcript";

/// Where the audio for one transcription job comes from.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Raw audio bytes, uploaded to AssemblyAI before the job is created.
    Bytes(Bytes),
    /// A URL AssemblyAI can fetch directly.
    Url(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

/// The transcription client used by the enrichment service.
#[derive(Clone)]
pub struct TranscriptionClient {
    client: Client,
    api_key: String,
}

impl TranscriptionClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Uploads raw audio bytes, returning the hosted URL to transcribe.
    async fn upload(&self, audio: Bytes) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(ASSEMBLYAI_UPLOAD_URL)
            .header("authorization", &self.api_key)
            .body(audio)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?;

        debug!("audio uploaded: {}", upload.upload_url);
        Ok(upload.upload_url)
    }
}

#[async_trait]
impl RemoteJobClient for TranscriptionClient {
    type Input = AudioSource;

    async fn submit(&self, input: &AudioSource) -> Result<Submission, SubmitError> {
        let audio_url = match input {
            AudioSource::Bytes(audio) => self.upload(audio.clone()).await?,
            AudioSource::Url(url) => url.clone(),
        };

        let response = self
            .client
            .post(ASSEMBLYAI_TRANSCRIPT_URL)
            .header("authorization", &self.api_key)
            .json(&json!({
                "audio_url": audio_url,
                "speaker_labels": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?;

        debug!("transcript job created: {}", created.id);
        Ok(Submission::Accepted(JobHandle(created.id)))
    }

    async fn poll(&self, handle: &JobHandle) -> Result<JobStatus, PollError> {
        let response = self
            .client
            .get(format!("{ASSEMBLYAI_TRANSCRIPT_URL}/{handle}"))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PollError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: Value = response.json().await.map_err(PollError::Http)?;
        Ok(classify_transcript_status(payload))
    }
}

/// Maps an AssemblyAI transcript snapshot to a job status.
/// `queued` and `processing` (and anything unrecognized) stay pending.
fn classify_transcript_status(payload: Value) -> JobStatus {
    match payload.get("status").and_then(Value::as_str) {
        Some("completed") => JobStatus::Completed(payload),
        Some("error") => {
            let reason = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("transcription failed with no reason given")
                .to_string();
            JobStatus::Failed(reason)
        }
        _ => JobStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_status_carries_full_payload() {
        let payload = json!({"status": "completed", "text": "hello", "words": []});
        match classify_transcript_status(payload) {
            JobStatus::Completed(p) => assert_eq!(p["text"], "hello"),
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_carries_remote_reason() {
        let payload = json!({"status": "error", "error": "audio too short"});
        match classify_transcript_status(payload) {
            JobStatus::Failed(reason) => assert_eq!(reason, "audio too short"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_without_reason_gets_placeholder() {
        let payload = json!({"status": "error"});
        match classify_transcript_status(payload) {
            JobStatus::Failed(reason) => assert!(reason.contains("no reason")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_queued_and_processing_are_pending() {
        for s in ["queued", "processing", "something_new"] {
            let payload = json!({"status": s});
            assert!(matches!(
                classify_transcript_status(payload),
                JobStatus::Pending
            ));
        }
    }

    #[test]
    fn test_missing_status_is_pending() {
        assert!(matches!(
            classify_transcript_status(json!({})),
            JobStatus::Pending
        ));
    }
}
