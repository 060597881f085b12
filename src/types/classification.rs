//! Classification schemas, instances and the derived `TagsPretty` view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named template of tag groups that can be applied to calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TagSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only populated when the schema is fetched with children included.
    #[serde(default)]
    pub groups: Vec<TagGroup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TagSchema {
    /// True for a schema body carrying no data at all (`{}`).
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.groups.is_empty()
            && self.extra.is_empty()
    }
}

/// A category of tags with a selection-count range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TagGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single selectable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display style, e.g. `Primary` or `Success`.
    #[serde(
        rename = "StyleEnum",
        alias = "Style",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What kind of item a classification is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClassifiedType {
    Undefined,
    #[serde(rename = "None")]
    Unclassified,
    DirectCall,
    #[default]
    ServiceCall,
    Email,
    CallListItem,
}

impl ClassifiedType {
    /// Whether the classified item is addressed by `CallListItemId` rather than `CallId`.
    pub fn targets_call_list_item(&self) -> bool {
        matches!(self, ClassifiedType::CallListItem)
    }
}

/// One selected tag. Only `tag_id` is sent on creation; the rest is filled in by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TagSelection {
    pub tag_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_group_name: Option<String>,
}

impl TagSelection {
    pub fn new(tag_id: i64) -> Self {
        Self {
            tag_id,
            ..Default::default()
        }
    }
}

/// Pretty-printed tags of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrettyTags {
    /// Group allows a single selection.
    Single(String),
    /// Group allows several selections; selection order is kept.
    Multiple(Vec<String>),
}

/// Group name -> tag name(s), in the order groups were first selected.
pub type TagsPretty = IndexMap<String, PrettyTags>;

/// A classification applied to a call or callback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ClassificationInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_schema_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_schema_name: Option<String>,
    #[serde(default)]
    pub tag_selections: Vec<TagSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_list_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classified_type_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classified_type: Option<ClassifiedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Derived by decoration; never sent to the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_pretty: Option<TagsPretty>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a classification.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClassification {
    /// Call id, or callback list item id when `classified_type` is `CallListItem`.
    pub target_id: String,
    pub schema_id: String,
    pub tag_selections: Vec<TagSelection>,
    pub note: Option<String>,
    pub classified_type: ClassifiedType,
}

impl NewClassification {
    pub fn new(
        target_id: impl Into<String>,
        schema_id: impl Into<String>,
        tag_ids: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            schema_id: schema_id.into(),
            tag_selections: tag_ids.into_iter().map(TagSelection::new).collect(),
            note: None,
            classified_type: ClassifiedType::default(),
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn classified_type(mut self, classified_type: ClassifiedType) -> Self {
        self.classified_type = classified_type;
        self
    }
}

/// Binding between a service queue and the schema its calls are classified with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct QueueSchema {
    #[serde(default)]
    pub queue_id: Option<String>,
    #[serde(default)]
    pub queue_name: Option<String>,
    #[serde(default)]
    pub schema_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Binding between a callback list and its classification schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CallListSchema {
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub list_name: Option<String>,
    #[serde(default)]
    pub schema_id: Option<String>,
    #[serde(default)]
    pub request_type_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
