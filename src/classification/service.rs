use super::decorator::decorate;
use super::resolver::SchemaResolver;
use crate::transport::{decode, ApiInvoker, ApiRequest};
use crate::types::{
    CallListSchema, ClassificationInstance, NewClassification, QueueSchema, TagSchema,
};
use crate::{Error, ErrorContext, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Longest note the API stores on a classification.
pub const MAX_NOTE_CHARS: usize = 500;

/// Options for listing classification schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaListOptions {
    /// Include groups and tags in the response.
    pub include_children: bool,
    /// Return only schemas modified after this instant.
    pub modified_after: Option<DateTime<Utc>>,
    pub include_archived: bool,
    pub include_deleted: bool,
}

/// Classification endpoints: schemas, instances and queue/call-list bindings.
#[derive(Clone)]
pub struct ClassificationService {
    invoker: Arc<dyn ApiInvoker>,
}

impl ClassificationService {
    pub fn new(invoker: Arc<dyn ApiInvoker>) -> Self {
        Self { invoker }
    }

    pub fn resolver(&self) -> SchemaResolver {
        SchemaResolver::new(self.clone())
    }

    /// List every schema visible to the user.
    pub async fn get_classification_schemas(
        &self,
        options: &SchemaListOptions,
    ) -> Result<Vec<TagSchema>> {
        let mut request = ApiRequest::get("/classification/schemas")
            .query("IncludeChildren", options.include_children)
            .query("IncludeArchived", options.include_archived)
            .query("IncludeDeleted", options.include_deleted);
        if let Some(after) = options.modified_after {
            request = request.query(
                "ModifiedAfter",
                after.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            );
        }
        let value = self.invoker.invoke(request).await?;
        decode(value, "classification schema list")
    }

    /// Fetch one schema; `include_children` populates its groups and tags.
    pub async fn get_classification_schema(
        &self,
        schema_id: &str,
        include_children: bool,
    ) -> Result<TagSchema> {
        let request = schema_request(schema_id, include_children)?;
        let value = self.invoker.invoke(request).await?;
        decode(value, "classification schema")
    }

    /// Like [`get_classification_schema`](Self::get_classification_schema), but a
    /// `null` or empty (`{}`) body yields `None` instead of a schema.
    pub(crate) async fn find_classification_schema(
        &self,
        schema_id: &str,
        include_children: bool,
    ) -> Result<Option<TagSchema>> {
        let request = schema_request(schema_id, include_children)?;
        let value = self.invoker.invoke(request).await?;
        if value.is_null() {
            return Ok(None);
        }
        let schema: TagSchema = decode(value, "classification schema")?;
        Ok(Some(schema).filter(|s| !s.is_empty()))
    }

    /// Classify a call or callback list item.
    pub async fn create_classification(
        &self,
        new: &NewClassification,
    ) -> Result<ClassificationInstance> {
        require(&new.target_id, "call_id")?;
        require(&new.schema_id, "schema_id")?;
        if new.tag_selections.is_empty() {
            return Err(Error::validation_with_context(
                "tag_selections cannot be empty",
                ErrorContext::new()
                    .with_field_path("tag_selections")
                    .with_source("classifications"),
            ));
        }
        if let Some(note) = &new.note {
            let chars = note.chars().count();
            if chars > MAX_NOTE_CHARS {
                return Err(Error::validation_with_context(
                    format!("note cannot exceed {} characters", MAX_NOTE_CHARS),
                    ErrorContext::new()
                        .with_field_path("note")
                        .with_details(format!("{} characters", chars))
                        .with_source("classifications"),
                ));
            }
        }

        let mut payload = serde_json::json!({
            "TagSchemaId": new.schema_id,
            "TagSelections": new.tag_selections,
            "ClassifiedType": new.classified_type,
        });
        if let Some(note) = new.note.as_deref().filter(|n| !n.is_empty()) {
            payload["Note"] = serde_json::json!(note);
        }
        let target_field = if new.classified_type.targets_call_list_item() {
            "CallListItemId"
        } else {
            "CallId"
        };
        payload[target_field] = serde_json::json!(new.target_id);

        let value = self
            .invoker
            .invoke(ApiRequest::post("/classification/instance").json(payload))
            .await?;
        let created: ClassificationInstance = decode(value, "classification")?;
        info!(
            classification_id = created.id.as_deref().unwrap_or(""),
            target_field, "classification created"
        );
        Ok(created)
    }

    /// Find classifications by call and/or callback list item.
    pub async fn find_classifications(
        &self,
        call_id: Option<&str>,
        callback_list_item_id: Option<&str>,
    ) -> Result<Vec<ClassificationInstance>> {
        let call_id = call_id.filter(|s| !s.is_empty());
        let callback_list_item_id = callback_list_item_id.filter(|s| !s.is_empty());
        if call_id.is_none() && callback_list_item_id.is_none() {
            return Err(Error::validation_with_context(
                "Either call_id or callback_list_item_id must be provided",
                ErrorContext::new()
                    .with_field_path("call_id")
                    .with_source("classifications"),
            ));
        }

        let mut request = ApiRequest::get("/classification/instance/");
        if let Some(id) = call_id {
            request = request.query("CallId", id);
        }
        if let Some(id) = callback_list_item_id {
            request = request.query("CallbackListItemId", id);
        }
        let value = self.invoker.invoke(request).await?;
        decode(value, "classification list")
    }

    /// First classification of `call_id`, or `None` if the call is unclassified.
    pub async fn get_call_classification(
        &self,
        call_id: &str,
    ) -> Result<Option<ClassificationInstance>> {
        require(call_id, "call_id")?;
        let classifications = self.find_classifications(Some(call_id), None).await?;
        Ok(classifications.into_iter().next())
    }

    /// Classification of `call_id` with `TagsPretty` filled in from its schema.
    ///
    /// Returns `None` when the call has no classification, and the classification
    /// as-is when it carries no schema id or its schema comes back empty. The
    /// schema is fetched on every call.
    pub async fn get_call_classification_pretty(
        &self,
        call_id: &str,
    ) -> Result<Option<ClassificationInstance>> {
        require(call_id, "call_id")?;
        let Some(classification) = self.get_call_classification(call_id).await? else {
            debug!(call_id, "call has no classification");
            return Ok(None);
        };

        let schema_id = match classification.tag_schema_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Ok(Some(classification)),
        };

        match self.resolver().resolve(&schema_id).await? {
            Some(lookup) => Ok(Some(decorate(classification, &lookup))),
            None => Ok(Some(classification)),
        }
    }

    /// Queue -> schema bindings for the current user.
    pub async fn get_queue_schemas(&self) -> Result<Vec<QueueSchema>> {
        let value = self
            .invoker
            .invoke(ApiRequest::get("/classification/queueschemas"))
            .await?;
        decode(value, "queue schema list")
    }

    /// Callback list -> schema bindings for the current user.
    pub async fn get_calllist_schemas(&self) -> Result<Vec<CallListSchema>> {
        let value = self
            .invoker
            .invoke(ApiRequest::get("/classification/calllistschemas"))
            .await?;
        decode(value, "call list schema list")
    }
}

fn schema_request(schema_id: &str, include_children: bool) -> Result<ApiRequest> {
    require(schema_id, "schema_id")?;
    let request = ApiRequest::get(format!("/classification/schemas/{}", schema_id))
        .query("IncludeChildren", include_children);
    Ok(request)
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} is required", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source("classifications"),
        ));
    }
    Ok(())
}
