use super::resolver::TagLookup;
use crate::types::{ClassificationInstance, PrettyTags, TagSelection, TagsPretty};
use tracing::debug;

/// Attach `TagsPretty` to `classification`. All other fields are left as they were.
pub fn decorate(mut classification: ClassificationInstance, lookup: &TagLookup) -> ClassificationInstance {
    classification.tags_pretty = Some(pretty_tags(&classification.tag_selections, lookup));
    classification
}

/// Group selected tags by group name, in selection order.
///
/// Multi-select groups (max selections > 1) collect a list. Single-select
/// groups hold one name; if the data carries more than one selection for such
/// a group the last one wins. Ids missing from the schema (deleted or archived
/// tags) are dropped.
pub fn pretty_tags(selections: &[TagSelection], lookup: &TagLookup) -> TagsPretty {
    let mut pretty = TagsPretty::new();
    for selection in selections {
        let Some(tag) = lookup.tag(selection.tag_id) else {
            debug!(tag_id = selection.tag_id, "tag not in schema, skipping");
            continue;
        };

        if lookup.max_selections(&tag.group) > 1 {
            match pretty.get_mut(&tag.group) {
                Some(PrettyTags::Multiple(names)) => names.push(tag.name.clone()),
                _ => {
                    pretty.insert(tag.group.clone(), PrettyTags::Multiple(vec![tag.name.clone()]));
                }
            }
        } else {
            pretty.insert(tag.group.clone(), PrettyTags::Single(tag.name.clone()));
        }
    }
    pretty
}
