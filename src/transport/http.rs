use super::error_classification::{classify_response, error_for_status};
use super::{ApiInvoker, ApiRequest, TransportError};
use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Instant;
use tracing::debug;

/// Authenticated HTTP transport bound to one user's API endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    username: String,
    secret_key: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        secret_key: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: normalize_endpoint(base_url)?,
            username: username.into(),
            secret_key: secret_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait]
impl ApiInvoker for HttpTransport {
    async fn invoke(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let path = request.normalized_path()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %request.method, %url, "invoking API");

        let mut req = self
            .client
            .request(request.method.as_reqwest(), &url)
            .basic_auth(&self.username, Some(&self.secret_key));
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let started = Instant::now();
        let response = req.send().await.map_err(TransportError::Http)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Http)?;
        debug!(
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "API response"
        );

        classify_response(status, &path, body)
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Bytes> {
        // Download URLs handed out by the API are pre-signed; no auth header.
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, "downloading resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), path, body));
        }
        let bytes = response.bytes().await.map_err(TransportError::Http)?;
        Ok(bytes)
    }
}

/// Build the shared reqwest client with the fixed JSON headers the API expects.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("X-Json-Serializer", HeaderValue::from_static("2"));

    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))
}

/// Validate an endpoint URL and strip the trailing slash.
pub(crate) fn normalize_endpoint(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    url::Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid API endpoint: {}", e),
            ErrorContext::new()
                .with_field_path("api_endpoint")
                .with_details(raw.to_string())
                .with_source("http_transport"),
        )
    })?;
    Ok(trimmed.to_string())
}
