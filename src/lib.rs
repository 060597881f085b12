//! # enreachvoice
//!
//! EnreachVoice REST API 的 Rust 客户端：服务发现、认证、通话记录、录音、转录与分类。
//!
//! Typed async client for the EnreachVoice telephony REST API.
//!
//! ## Overview
//!
//! The client performs service discovery for a user, authenticates (secret key
//! or password), and exposes typed wrappers for call records, recordings,
//! transcripts and call classifications. Two pieces carry actual logic:
//!
//! - **Classification decoration**: selected tag ids are mapped back to
//!   human-readable group and tag names using a freshly fetched schema
//!   ([`classification`]).
//! - **Transcript polling**: a pending transcript is re-fetched at a fixed
//!   interval within a bounded retry budget ([`transcript`]).
//!
//! Everything else is a thin translation into HTTP requests, routed through the
//! [`ApiInvoker`] trait so higher layers can be driven by any transport.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use enreachvoice::{CallFilter, EnreachClient};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> enreachvoice::Result<()> {
//!     let client = EnreachClient::builder()
//!         .username("user@example.com")
//!         .secret_key("your-secret-key")
//!         .build()
//!         .await?;
//!
//!     let end = Utc::now();
//!     let calls = client
//!         .get_user_calls(&CallFilter::started_between(end - Duration::days(1), end))
//!         .await?;
//!     println!("{} calls", calls.len());
//!
//!     if let Some(c) = client.get_call_classification_pretty("call-id").await? {
//!         println!("{:?}", c.tags_pretty);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client and builder, call queries, recording download |
//! | [`classification`] | Schemas, classification instances, `TagsPretty` |
//! | [`transcript`] | Transcript fetching and pending-state polling |
//! | [`transport`] | `ApiInvoker` trait, HTTP transport, discovery |
//! | [`types`] | Wire data types |
//! | [`config`] | Defaults and environment overrides |

pub mod classification;
pub mod client;
pub mod config;
pub mod transcript;
pub mod transport;
pub mod types;

pub use classification::{ClassificationService, SchemaListOptions, TagLookup};
pub use client::{EnreachClient, EnreachClientBuilder};
pub use config::{ClientConfig, PollPolicy};
pub use transcript::TranscriptPoller;
pub use transport::{ApiInvoker, ApiRequest, HttpTransport, Method};
pub use types::{
    CallFilter, CallRecord, ClassificationInstance, ClassifiedType, NewClassification, PrettyTags,
    TagSchema, TagSelection, TagsPretty, Transcript, TranscriptStatus,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
