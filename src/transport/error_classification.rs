//! Error classification logic

use crate::{Error, Result};

/// Turn an HTTP status and body into either the decoded JSON payload or a typed error.
///
/// Mapping follows the service's documented status codes:
/// - 401 -> authentication (credentials rejected)
/// - 404 -> not found
/// - 429 -> rate limited
/// - any other non-2xx -> upstream failure
///
/// A 2xx body that is not JSON is also an upstream failure.
pub(crate) fn classify_response(status: u16, path: &str, body: String) -> Result<serde_json::Value> {
    if !(200..=299).contains(&status) {
        return Err(error_for_status(status, path, body));
    }
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| Error::Upstream {
        message: format!("API returned invalid JSON: {}", e),
        status: Some(status),
        body: Some(body.clone()),
    })
}

/// Typed error for a non-2xx response to `path`.
pub(crate) fn error_for_status(status: u16, path: &str, body: String) -> Error {
    let body = if body.is_empty() { None } else { Some(body) };
    match status {
        401 => Error::Authentication {
            message: "Authentication failed. Check your credentials.".to_string(),
            status: Some(status),
            body,
        },
        404 => Error::NotFound {
            message: format!("Resource not found: {}", path),
            status,
            body,
        },
        429 => Error::RateLimited {
            message: "API rate limit exceeded. Please retry later.".to_string(),
            status,
            body,
        },
        _ => Error::Upstream {
            message: format!("API request failed: {}", status),
            status: Some(status),
            body,
        },
    }
}
