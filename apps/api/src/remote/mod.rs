/// Remote job clients — the single point of entry for all third-party AI calls.
///
/// ARCHITECTURAL RULE: No other module may call the AssemblyAI or Groq APIs
/// directly. All remote interactions MUST go through this module.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod analysis;
pub mod prompts;
pub mod transcription;

/// Opaque identifier for a job accepted by a remote service.
/// Scoped to exactly one orchestration run — never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(pub String);

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a remote job's state, produced by each `poll` call.
#[derive(Debug, Clone)]
pub enum JobStatus {
    Pending,
    Completed(Value),
    Failed(String),
}

/// Result of submitting work to a remote service.
///
/// Truly asynchronous services return `Accepted` and must be polled;
/// synchronous-request/response services (the analysis LLM) return `Terminal`
/// directly, so the orchestrator's poll loop runs zero iterations for them.
#[derive(Debug)]
pub enum Submission {
    Accepted(JobHandle),
    Terminal(JobStatus),
}

/// Submission failure: remote unreachable, non-success status, or the payload
/// was rejected as malformed. Submission is attempted exactly once per
/// enrichment run — there is no automatic resubmission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response from remote service: {0}")]
    Malformed(String),
}

/// Transient transport failure during polling. The orchestrator counts it as
/// a pending attempt and retries on the next interval.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Contract for a remote asynchronous job API: submit work, poll by handle.
#[async_trait]
pub trait RemoteJobClient: Send + Sync {
    /// The work item this client accepts.
    type Input: Send + Sync;

    /// Sends the work item to the remote service. Called exactly once per
    /// enrichment run.
    async fn submit(&self, input: &Self::Input) -> Result<Submission, SubmitError>;

    /// Queries the current status of a previously accepted job.
    /// Each call is a fresh snapshot; nothing is retained across polls.
    async fn poll(&self, handle: &JobHandle) -> Result<JobStatus, PollError>;
}
