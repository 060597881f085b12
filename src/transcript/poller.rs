use crate::config::PollPolicy;
use crate::transport::{decode, ApiInvoker, ApiRequest};
use crate::types::Transcript;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches transcripts, optionally waiting out the `Pending` state.
#[derive(Clone)]
pub struct TranscriptPoller {
    invoker: Arc<dyn ApiInvoker>,
    policy: PollPolicy,
}

impl TranscriptPoller {
    pub fn new(invoker: Arc<dyn ApiInvoker>, policy: PollPolicy) -> Self {
        Self { invoker, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Fetch a transcript.
    ///
    /// With `wait_pending` unset the first response is returned whatever its
    /// status. Otherwise a `Pending` transcript is re-fetched after
    /// `policy.delay`, up to `policy.max_retries` times; still pending after
    /// that yields [`Error::Timeout`]. Any non-pending status ends the loop.
    pub async fn get(&self, transcript_id: &str, wait_pending: bool) -> Result<Transcript> {
        if transcript_id.trim().is_empty() {
            return Err(Error::validation_with_context(
                "transcript_id is required",
                ErrorContext::new()
                    .with_field_path("transcript_id")
                    .with_source("transcripts"),
            ));
        }

        let path = format!("/calls/transcripts/{}", transcript_id);
        let mut transcript = self.fetch(&path).await?;
        if !wait_pending {
            return Ok(transcript);
        }

        let mut retries = 0u32;
        while transcript.status.is_pending() {
            if retries >= self.policy.max_retries {
                return Err(Error::Timeout {
                    transcript_id: transcript_id.to_string(),
                    retries,
                });
            }
            retries += 1;
            debug!(
                transcript_id,
                retries,
                delay_ms = self.policy.delay.as_millis() as u64,
                "transcript pending, waiting"
            );
            tokio::time::sleep(self.policy.delay).await;
            transcript = self.fetch(&path).await?;
            info!(transcript_id, status = %transcript.status, "retrieved transcript status");
        }
        Ok(transcript)
    }

    async fn fetch(&self, path: &str) -> Result<Transcript> {
        let value = self.invoker.invoke(ApiRequest::get(path)).await?;
        decode(value, "transcript")
    }
}
