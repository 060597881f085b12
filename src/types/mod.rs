//! 类型模块：EnreachVoice REST API 的请求与响应数据类型。
//!
//! # Types Module
//!
//! Wire types use the API's PascalCase field names. Fields this crate does not
//! model explicitly are kept in an `extra` map so records round-trip untouched.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`classification`] | Schemas, groups, tags, classification instances, `TagsPretty` |
//! | [`calls`] | Call query filters |
//! | [`transcript`] | Transcript records and status |
//! | [`recording`] | Recording metadata |
//! | [`user`] | Authenticated user |

pub mod calls;
pub mod classification;
pub mod recording;
pub mod transcript;
pub mod user;

pub use calls::{CallFilter, TimeWindow};
pub use classification::{
    CallListSchema, ClassificationInstance, ClassifiedType, NewClassification, PrettyTags,
    QueueSchema, Tag, TagGroup, TagSchema, TagSelection, TagsPretty,
};
pub use recording::RecordingMetadata;
pub use transcript::{Transcript, TranscriptStatus};
pub use user::CurrentUser;

/// A call event record. The API returns a wide, evolving set of fields, so
/// records are handed back as JSON objects.
pub type CallRecord = serde_json::Map<String, serde_json::Value>;
