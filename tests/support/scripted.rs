//! In-memory `ApiInvoker` that replays canned responses and records requests.

use async_trait::async_trait;
use bytes::Bytes;
use enreachvoice::{ApiInvoker, ApiRequest, Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<Result<serde_json::Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedInvoker {
    pub fn new(responses: Vec<Result<serde_json::Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(responses: Vec<serde_json::Value>) -> Arc<Self> {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl ApiInvoker for ScriptedInvoker {
    async fn invoke(&self, request: ApiRequest) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::upstream("no scripted response left")))
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Bytes> {
        Err(Error::upstream(format!("unexpected download of {}", path)))
    }
}
