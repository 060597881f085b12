use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata returned for a call recording; `URL` is relative to the API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
