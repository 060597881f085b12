use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for validation and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Argument or configuration key that caused the error (e.g., "call_id", "builder.api_endpoint")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "classifications", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the EnreachVoice client.
///
/// Upstream HTTP failures are classified by status code; each variant keeps the
/// status and raw body so callers can diagnose what the API actually returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("{message} (HTTP {status})")]
    NotFound {
        message: String,
        status: u16,
        body: Option<String>,
    },

    #[error("{message}{}", format_status(.status))]
    Authentication {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("{message} (HTTP {status})")]
    RateLimited {
        message: String,
        status: u16,
        body: Option<String>,
    },

    #[error("{message}{}", format_status(.status))]
    Upstream {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("Transcript {transcript_id} still pending after {retries} retries")]
    Timeout { transcript_id: String, retries: u32 },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl Error {
    /// Create a validation error for a missing or malformed caller argument.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Upstream failure with no HTTP status (malformed payloads, discovery gaps).
    pub fn upstream(msg: impl Into<String>) -> Self {
        Error::Upstream {
            message: msg.into(),
            status: None,
            body: None,
        }
    }

    /// HTTP status code returned by the API, if the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::NotFound { status, .. } | Error::RateLimited { status, .. } => Some(*status),
            Error::Authentication { status, .. } | Error::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body returned by the API, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::NotFound { body, .. }
            | Error::RateLimited { body, .. }
            | Error::Authentication { body, .. }
            | Error::Upstream { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
