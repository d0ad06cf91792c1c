//! Remote store client for the DeskHub task backend
//!
//! Wraps the backend's HTTP/JSON CRUD routes behind the [`RemoteStore`]
//! trait. Each call is a single request/response round trip; retry policy
//! is the caller's responsibility and none is implemented here.

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use error::StoreError;
pub use http::HttpStore;
pub use store::RemoteStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
