//! Polling orchestrator — drives a remote job from submission to a terminal
//! state under attempt and time bounds.
//!
//! The loop is deliberately bounded: `max_attempts` polls spaced by
//! `interval`, each wrapped in `attempt_timeout`. A transport failure or a
//! slow poll counts as a pending attempt and is retried on the next interval;
//! it never resets the counter and never terminates the run on its own. The
//! remote service's internal latency (minutes for long audio) dwarfs normal
//! network jitter, so tolerating a few dropped polls costs little.
//!
//! One orchestration runs per enrichment request with no shared mutable
//! state, so concurrent runs make independent progress. The only suspension
//! points are the poll and sleep awaits; dropping the future cancels the run
//! without touching work already accepted by the remote service.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::remote::{JobStatus, RemoteJobClient, SubmitError, Submission};

/// Polling configuration, fixed per client type rather than per request.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub attempt_timeout: Duration,
}

/// Policy for transcription jobs: the source service polls every 3 seconds;
/// 100 attempts bounds a run at roughly five minutes of wall clock.
pub const TRANSCRIPTION_POLL_POLICY: PollPolicy = PollPolicy {
    max_attempts: 100,
    interval: Duration::from_secs(3),
    attempt_timeout: Duration::from_secs(10),
};

/// Policy for analysis jobs. Analysis submissions return a terminal status
/// directly, so the loop never runs; the policy exists so both clients go
/// through the same code path.
pub const ANALYSIS_POLL_POLICY: PollPolicy = PollPolicy {
    max_attempts: 1,
    interval: Duration::from_secs(1),
    attempt_timeout: Duration::from_secs(120),
};

/// Terminal state of one orchestration run.
#[derive(Debug)]
pub enum JobOutcome {
    /// The remote job completed; carries the raw payload for reduction.
    Completed(Value),
    /// Submission itself failed; zero polls were made.
    SubmitFailed(SubmitError),
    /// The remote service explicitly reported the job as failed.
    RemoteFailed(String),
    /// The attempt budget was exhausted while the job was still pending.
    TimedOut { attempts: u32 },
}

/// Submits `input` and polls until a terminal state.
///
/// Submission is attempted exactly once. A handle is polled at most
/// `policy.max_attempts` times; once a terminal status is observed the
/// handle is discarded and no further call references it.
pub async fn run_job<C: RemoteJobClient>(
    client: &C,
    input: &C::Input,
    policy: &PollPolicy,
) -> JobOutcome {
    let handle = match client.submit(input).await {
        Ok(Submission::Accepted(handle)) => handle,
        Ok(Submission::Terminal(status)) => {
            debug!("submission returned terminal status, skipping poll loop");
            return match status {
                JobStatus::Completed(payload) => JobOutcome::Completed(payload),
                JobStatus::Failed(reason) => JobOutcome::RemoteFailed(reason),
                // Contract violation: a terminal submission must not be pending.
                JobStatus::Pending => {
                    JobOutcome::RemoteFailed("remote returned pending as terminal".to_string())
                }
            };
        }
        Err(e) => {
            warn!("submission failed: {e}");
            return JobOutcome::SubmitFailed(e);
        }
    };

    debug!("job {handle} submitted, polling up to {} times", policy.max_attempts);

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.interval).await;
        }

        match tokio::time::timeout(policy.attempt_timeout, client.poll(&handle)).await {
            Ok(Ok(JobStatus::Completed(payload))) => {
                debug!("job {handle} completed after {attempt} poll(s)");
                return JobOutcome::Completed(payload);
            }
            Ok(Ok(JobStatus::Failed(reason))) => {
                warn!("job {handle} failed remotely: {reason}");
                return JobOutcome::RemoteFailed(reason);
            }
            Ok(Ok(JobStatus::Pending)) => {
                debug!("job {handle} pending (attempt {attempt}/{})", policy.max_attempts);
            }
            // Transport hiccups are transient: count the attempt and retry.
            Ok(Err(e)) => {
                warn!("poll attempt {attempt} for job {handle} failed: {e}");
            }
            Err(_) => {
                warn!(
                    "poll attempt {attempt} for job {handle} exceeded {:?}",
                    policy.attempt_timeout
                );
            }
        }
    }

    warn!("job {handle} still pending after {} attempts", policy.max_attempts);
    JobOutcome::TimedOut {
        attempts: policy.max_attempts,
    }
}
