use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user, as returned by `users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
