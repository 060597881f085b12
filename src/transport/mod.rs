//! 传输层：API 调用抽象与基于 reqwest 的 HTTP 实现。
//!
//! Everything above this module talks to the service through [`ApiInvoker`],
//! so classification, transcript and call queries can be exercised against a
//! scripted invoker without a network.

pub mod discovery;
pub(crate) mod error_classification;
pub mod http;

pub use http::HttpTransport;

use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

/// HTTP methods accepted by the EnreachVoice REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single REST call: method, path relative to the API endpoint, query and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query value for `key`, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path with a guaranteed leading slash.
    pub fn normalized_path(&self) -> Result<String> {
        let path = self.path.trim();
        if path.is_empty() {
            return Err(Error::validation_with_context(
                "Path must be provided",
                ErrorContext::new()
                    .with_field_path("request.path")
                    .with_source("transport"),
            ));
        }
        if path.starts_with('/') {
            Ok(path.to_string())
        } else {
            Ok(format!("/{}", path))
        }
    }
}

/// The "invoke the API" capability that every higher-level operation depends on.
#[async_trait]
pub trait ApiInvoker: Send + Sync {
    /// Execute a JSON API call and return the decoded response body.
    async fn invoke(&self, request: ApiRequest) -> Result<serde_json::Value>;

    /// Download a binary resource located relative to the API endpoint.
    async fn fetch_bytes(&self, path: &str) -> Result<Bytes>;
}

/// Decode an API response into a typed value; shape mismatches count as upstream failures.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::upstream(format!("Malformed {} response: {}", what, e)))
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
