use crate::client::core::EnreachClient;
use crate::transport::{decode, ApiRequest};
use crate::types::{CallFilter, CallRecord};
use crate::Result;
use tracing::info;

impl EnreachClient {
    /// Call events associated with users. One call id can appear in several events.
    ///
    /// The filter needs a start/end window, a modified window or a call id.
    pub async fn get_user_calls(&self, filter: &CallFilter) -> Result<Vec<CallRecord>> {
        let request = with_query(ApiRequest::get("/calls"), filter.to_query(true)?);
        let calls: Vec<CallRecord> = decode(self.invoker.invoke(request).await?, "calls")?;
        info!(count = calls.len(), "retrieved calls");
        Ok(calls)
    }

    /// Inbound queue calls (service calls). The filter needs a time window.
    pub async fn get_inbound_queue_calls(&self, filter: &CallFilter) -> Result<Vec<CallRecord>> {
        let request = with_query(ApiRequest::get("/servicecall"), filter.to_query(false)?);
        let value = self.invoker.invoke(request).await?;
        let calls: Vec<CallRecord> = decode(value, "service calls")?;
        info!(count = calls.len(), "retrieved service calls");
        Ok(calls)
    }
}

fn with_query(mut request: ApiRequest, query: Vec<(String, String)>) -> ApiRequest {
    request.query.extend(query);
    request
}
