//! 分类模块：分类方案、分类实例以及可读化标签（TagsPretty）。
//!
//! Classification support.
//!
//! [`ClassificationService`] wraps the classification endpoints. The one piece
//! of real logic lives in [`resolver`] (schema -> tag lookup) and
//! [`decorator`] (tag ids -> grouped display names); both are usable on their
//! own with data obtained elsewhere.
//!
//! ```rust,no_run
//! # async fn demo(client: &enreachvoice::EnreachClient) -> enreachvoice::Result<()> {
//! if let Some(c) = client
//!     .classifications()
//!     .get_call_classification_pretty("48c1222c-88ab-40c0-8693-a76d05b33814")
//!     .await?
//! {
//!     println!("{:?}", c.tags_pretty);
//! }
//! # Ok(())
//! # }
//! ```

pub mod decorator;
pub mod resolver;
pub mod service;

pub use decorator::{decorate, pretty_tags};
pub use resolver::{ResolvedTag, SchemaResolver, TagLookup};
pub use service::{ClassificationService, SchemaListOptions, MAX_NOTE_CHARS};
