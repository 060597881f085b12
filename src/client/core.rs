use crate::classification::ClassificationService;
use crate::client::builder::EnreachClientBuilder;
use crate::config::ClientConfig;
use crate::transcript::TranscriptPoller;
use crate::transport::{ApiInvoker, ApiRequest};
use crate::types::{ClassificationInstance, Transcript};
use crate::Result;
use std::sync::Arc;

/// Authenticated EnreachVoice client.
///
/// Holds only immutable state (credentials inside the invoker, endpoint,
/// config), so one instance can be shared across tasks behind an `Arc`.
pub struct EnreachClient {
    pub(crate) invoker: Arc<dyn ApiInvoker>,
    pub(crate) username: String,
    pub(crate) user_id: String,
    pub(crate) api_endpoint: String,
    pub(crate) config: ClientConfig,
}

impl std::fmt::Debug for EnreachClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnreachClient")
            .field("username", &self.username)
            .field("user_id", &self.user_id)
            .field("api_endpoint", &self.api_endpoint)
            .finish_non_exhaustive()
    }
}

impl EnreachClient {
    /// Discover the endpoint for `username` and authenticate with a secret key.
    pub async fn new(username: &str, secret_key: &str) -> Result<Self> {
        EnreachClientBuilder::new()
            .username(username)
            .secret_key(secret_key)
            .build()
            .await
    }

    pub fn builder() -> EnreachClientBuilder {
        EnreachClientBuilder::new()
    }

    /// Assemble a client around an existing invoker, skipping discovery and `users/me`.
    pub fn from_invoker(
        invoker: Arc<dyn ApiInvoker>,
        username: impl Into<String>,
        user_id: impl Into<String>,
        api_endpoint: impl Into<String>,
        config: ClientConfig,
    ) -> Self {
        Self {
            invoker,
            username: username.into(),
            user_id: user_id.into(),
            api_endpoint: api_endpoint.into(),
            config,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Id of the authenticated user, from `users/me`.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn invoker(&self) -> Arc<dyn ApiInvoker> {
        self.invoker.clone()
    }

    /// Raw escape hatch for endpoints without a typed wrapper.
    pub async fn invoke_api(&self, request: ApiRequest) -> Result<serde_json::Value> {
        self.invoker.invoke(request).await
    }

    pub fn classifications(&self) -> ClassificationService {
        ClassificationService::new(self.invoker.clone())
    }

    pub fn transcripts(&self) -> TranscriptPoller {
        TranscriptPoller::new(self.invoker.clone(), self.config.transcript_poll)
    }

    /// Fetch a transcript, waiting out `Pending` when `wait_pending` is set.
    pub async fn get_transcript(&self, transcript_id: &str, wait_pending: bool) -> Result<Transcript> {
        self.transcripts().get(transcript_id, wait_pending).await
    }

    /// See [`ClassificationService::get_call_classification_pretty`].
    pub async fn get_call_classification_pretty(
        &self,
        call_id: &str,
    ) -> Result<Option<ClassificationInstance>> {
        self.classifications()
            .get_call_classification_pretty(call_id)
            .await
    }
}
