//! Resume analysis client — wraps the Groq chat-completions API.
//!
//! The remote call is synchronous request/response: `submit` performs the
//! whole completion and returns an already-terminal status, so the polling
//! orchestrator never iterates for this client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::remote::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::remote::{JobHandle, JobStatus, PollError, RemoteJobClient, SubmitError, Submission};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all analysis calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 2000;

/// One resume-vs-job comparison to run through the LLM.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub resume_text: String,
    pub job_requirements: String,
    pub job_title: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// The analysis client used by the enrichment service.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    api_key: String,
}

impl AnalysisClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl RemoteJobClient for AnalysisClient {
    type Input = AnalysisInput;

    async fn submit(&self, input: &AnalysisInput) -> Result<Submission, SubmitError> {
        let prompt = build_analysis_prompt(
            &input.job_title,
            &input.job_requirements,
            &input.resume_text,
        );

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ANALYSIS_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
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

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SubmitError::Malformed("no choices in completion".to_string()))?;

        debug!("analysis completion received ({} bytes)", content.len());

        Ok(Submission::Terminal(JobStatus::Completed(Value::String(
            content,
        ))))
    }

    // Analysis jobs complete at submission; the orchestrator never polls them.
    async fn poll(&self, _handle: &JobHandle) -> Result<JobStatus, PollError> {
        Ok(JobStatus::Failed(
            "analysis completes synchronously; there is nothing to poll".to_string(),
        ))
    }
}
