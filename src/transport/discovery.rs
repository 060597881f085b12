//! Service discovery and password authentication.
//!
//! Both run before an authenticated [`HttpTransport`](super::HttpTransport)
//! exists, so they take a bare `reqwest::Client`.

use super::http::normalize_endpoint;
use super::TransportError;
use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use tracing::{debug, error, info};

#[derive(Debug, Deserialize)]
struct DiscoveryEntry {
    #[serde(rename = "apiEndpoint")]
    api_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "SecretKey")]
    secret_key: String,
}

/// Look up the REST endpoint serving `username`.
///
/// Returns the first advertised endpoint without its trailing slash.
pub async fn discover_api_endpoint(
    client: &reqwest::Client,
    discovery_url: &str,
    username: &str,
) -> Result<String> {
    let mut url = url::Url::parse(discovery_url.trim_end_matches('/')).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid discovery URL: {}", e),
            ErrorContext::new()
                .with_field_path("discovery_url")
                .with_details(discovery_url.to_string())
                .with_source("discovery"),
        )
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            Error::configuration_with_context(
                "Discovery URL cannot be a base",
                ErrorContext::new()
                    .with_field_path("discovery_url")
                    .with_source("discovery"),
            )
        })?
        .pop_if_empty()
        .extend(["api", "user"]);
    url.query_pairs_mut().append_pair("user", username);
    debug!(%url, "invoking discovery");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(TransportError::Http)?;
    let status = response.status();
    let body = response.text().await.map_err(TransportError::Http)?;
    if status.as_u16() != 200 {
        error!(status = status.as_u16(), "discovery failed");
        return Err(Error::Upstream {
            message: format!("Discovery failed with status {}", status.as_u16()),
            status: Some(status.as_u16()),
            body: Some(body),
        });
    }

    let entries: Vec<DiscoveryEntry> = serde_json::from_str(&body)
        .map_err(|e| Error::upstream(format!("Invalid discovery response: {}", e)))?;
    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| Error::upstream("Invalid discovery response: no endpoints for user"))?;
    let endpoint = normalize_endpoint(&entry.api_endpoint)
        .map_err(|e| Error::upstream(format!("Invalid discovery response: {}", e)))?;
    info!(api_endpoint = %endpoint, "discovered API endpoint");
    Ok(endpoint)
}

/// Exchange a user password for an API secret key.
pub async fn authenticate_with_password(
    client: &reqwest::Client,
    api_endpoint: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let mut url = url::Url::parse(api_endpoint.trim_end_matches('/')).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid API endpoint: {}", e),
            ErrorContext::new()
                .with_field_path("api_endpoint")
                .with_details(api_endpoint.to_string())
                .with_source("authentication"),
        )
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            Error::configuration_with_context(
                "API endpoint cannot be a base",
                ErrorContext::new()
                    .with_field_path("api_endpoint")
                    .with_source("authentication"),
            )
        })?
        .pop_if_empty()
        .extend(["authuser", username]);
    debug!(%url, "invoking POST");
    let payload = serde_json::json!({
        "UserName": username,
        "Password": password,
    });

    let response = client.post(url).json(&payload).send().await.map_err(|e| {
        Error::Authentication {
            message: format!("Network error during authentication: {}", e),
            status: None,
            body: None,
        }
    })?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(TransportError::Http)?;
    if status != 200 {
        error!(status, "authentication failed");
        return Err(Error::Authentication {
            message: format!("Authentication failed with status {}", status),
            status: Some(status),
            body: Some(body),
        });
    }

    let auth: AuthResponse = serde_json::from_str(&body).map_err(|e| Error::Authentication {
        message: format!("Invalid authentication response: {}", e),
        status: Some(status),
        body: Some(body.clone()),
    })?;
    info!(username, "user authenticated successfully");
    Ok(auth.secret_key)
}
