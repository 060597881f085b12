//! Client entry point.
//!
//! [`EnreachClient`] is built once (discovery, authentication, `users/me`) and
//! then hands out the typed services. Call queries and recording downloads are
//! implemented in their own submodules as inherent methods.

pub mod builder;
mod calls;
pub mod core;
mod recordings;

pub use builder::EnreachClientBuilder;
pub use core::EnreachClient;
