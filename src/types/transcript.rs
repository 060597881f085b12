//! Call transcript records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Processing state reported for a transcript.
///
/// Only `Pending` drives polling; every other value is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TranscriptStatus {
    Pending,
    Completed,
    Failed,
    Other(String),
}

impl TranscriptStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, TranscriptStatus::Pending)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TranscriptStatus::Pending => "Pending",
            TranscriptStatus::Completed => "Completed",
            TranscriptStatus::Failed => "Failed",
            TranscriptStatus::Other(s) => s,
        }
    }
}

impl From<String> for TranscriptStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => TranscriptStatus::Pending,
            "Completed" => TranscriptStatus::Completed,
            "Failed" => TranscriptStatus::Failed,
            _ => TranscriptStatus::Other(s),
        }
    }
}

impl From<TranscriptStatus> for String {
    fn from(status: TranscriptStatus) -> Self {
        match status {
            TranscriptStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "TranscriptId", default, skip_serializing_if = "Option::is_none")]
    pub transcript_id: Option<String>,
    #[serde(rename = "TranscriptStatus")]
    pub status: TranscriptStatus,
    /// Text, segments and whatever else the API attaches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transcript {
    pub fn text(&self) -> Option<&str> {
        self.extra.get("Text").and_then(Value::as_str)
    }
}
