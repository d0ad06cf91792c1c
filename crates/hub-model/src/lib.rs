//! Domain types for the DeskHub dashboard data layer
//!
//! Defines the fundamental types shared by every other crate:
//! - Task records and their category tags
//! - Strongly-typed identifiers (user, task)
//! - The composite cache key (resource kind + scope + user)

#![warn(unreachable_pub)]

pub mod key;
pub mod task;

pub use key::{QueryKey, ResourceKind, Scope, UserId};
pub use task::{Category, CategoryParseError, NewTask, Task, TaskId, ToggleField};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
