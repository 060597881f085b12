//! Reverse lookup from tag id to its display name and owning group.

use super::service::ClassificationService;
use crate::types::TagSchema;
use crate::Result;
use std::collections::HashMap;
use tracing::debug;

const UNKNOWN_GROUP: &str = "Unknown Group";
const UNKNOWN_TAG: &str = "Unknown Tag";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub name: String,
    pub group: String,
}

/// Tag id -> (tag name, group name), plus group name -> max selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLookup {
    tags: HashMap<i64, ResolvedTag>,
    group_max_selections: HashMap<String, u32>,
}

impl TagLookup {
    /// Index every identified tag of `schema`.
    ///
    /// Tags without an id (or with id 0) are skipped. Groups sharing a name
    /// share one entry; the last group's max selections wins.
    pub fn from_schema(schema: &TagSchema) -> Self {
        let mut lookup = TagLookup::default();
        for group in &schema.groups {
            let group_name = group.name.as_deref().unwrap_or(UNKNOWN_GROUP);
            lookup
                .group_max_selections
                .insert(group_name.to_string(), group.max_selections.unwrap_or(1));

            for tag in &group.tags {
                let Some(id) = tag.id.filter(|id| *id != 0) else {
                    continue;
                };
                lookup.tags.insert(
                    id,
                    ResolvedTag {
                        name: tag.name.as_deref().unwrap_or(UNKNOWN_TAG).to_string(),
                        group: group_name.to_string(),
                    },
                );
            }
        }
        lookup
    }

    pub fn tag(&self, tag_id: i64) -> Option<&ResolvedTag> {
        self.tags.get(&tag_id)
    }

    /// Max selections of `group`; unknown groups count as single-select.
    pub fn max_selections(&self, group: &str) -> u32 {
        self.group_max_selections.get(group).copied().unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Fetches a schema with its groups and tags and indexes it.
///
/// Nothing is cached: every call re-fetches the schema.
#[derive(Clone)]
pub struct SchemaResolver {
    service: ClassificationService,
}

impl SchemaResolver {
    pub fn new(service: ClassificationService) -> Self {
        Self { service }
    }

    /// Index `schema_id`; `None` when the API returns no schema body.
    pub async fn resolve(&self, schema_id: &str) -> Result<Option<TagLookup>> {
        let Some(schema) = self
            .service
            .find_classification_schema(schema_id, true)
            .await?
        else {
            debug!(schema_id, "classification schema is empty");
            return Ok(None);
        };
        let lookup = TagLookup::from_schema(&schema);
        debug!(schema_id, tags = lookup.len(), "resolved classification schema");
        Ok(Some(lookup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tag, TagGroup};

    fn tag(id: Option<i64>, name: Option<&str>) -> Tag {
        Tag {
            id,
            name: name.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn tags_without_id_are_skipped() {
        let schema = TagSchema {
            groups: vec![TagGroup {
                name: Some("Customer type".into()),
                max_selections: Some(1),
                tags: vec![
                    tag(Some(200), Some("Prospect")),
                    tag(None, Some("Ghost")),
                    tag(Some(0), Some("Zero")),
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let lookup = TagLookup::from_schema(&schema);
        assert_eq!(lookup.len(), 1);
        assert_eq!(
            lookup.tag(200),
            Some(&ResolvedTag {
                name: "Prospect".into(),
                group: "Customer type".into()
            })
        );
        assert_eq!(lookup.tag(0), None);
    }

    #[test]
    fn missing_names_and_limits_get_defaults() {
        let schema = TagSchema {
            groups: vec![TagGroup {
                tags: vec![tag(Some(7), None)],
                ..Default::default()
            }],
            ..Default::default()
        };
        let lookup = TagLookup::from_schema(&schema);
        let resolved = lookup.tag(7).unwrap();
        assert_eq!(resolved.name, "Unknown Tag");
        assert_eq!(resolved.group, "Unknown Group");
        assert_eq!(lookup.max_selections("Unknown Group"), 1);
        assert_eq!(lookup.max_selections("never seen"), 1);
    }
}
