//! Composite cache keys
//!
//! A cached collection is identified by (resource kind, scope, user).
//! The key is an explicit struct with derived equality rather than the
//! loosely-typed tuples the backend routes imply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the user owning a collection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Resource families exposed by the backend
///
/// One family per dashboard feature; the sync core only caches `Tasks`,
/// the rest are listed so keys stay unambiguous across features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Planner tasks
    Tasks,
    /// Saved bookmarks
    Bookmarks,
    /// Calendar events
    Events,
    /// Work experience entries
    Experience,
    /// Skills tracker entries
    Skills,
    /// Job applications
    Jobs,
    /// Portfolio projects
    Projects,
    /// Notepad content
    Notepad,
}

impl ResourceKind {
    /// Route prefix for this resource family
    #[inline]
    #[must_use]
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Bookmarks => "bookmarks",
            Self::Events => "events",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Jobs => "jobs",
            Self::Projects => "projects",
            Self::Notepad => "notepad",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_prefix())
    }
}

/// Which slice of a collection a cache entry covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Scope {
    /// The whole collection
    #[default]
    All,
    /// Only entries with the given category tag
    Category(crate::task::Category),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(cat) => write!(f, "category:{cat}"),
        }
    }
}

/// Composite cache key: one cached collection per (resource, scope, user)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    /// Resource family
    pub resource: ResourceKind,
    /// Slice of the collection
    pub scope: Scope,
    /// Owning user
    pub user: UserId,
}

impl QueryKey {
    /// Key for a user's full task list
    #[inline]
    #[must_use]
    pub fn tasks(user: UserId) -> Self {
        Self {
            resource: ResourceKind::Tasks,
            scope: Scope::All,
            user,
        }
    }

    /// Key for one category slice of a user's tasks
    #[inline]
    #[must_use]
    pub fn tasks_in(user: UserId, category: crate::task::Category) -> Self {
        Self {
            resource: ResourceKind::Tasks,
            scope: Scope::Category(category),
            user,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.resource, self.scope, self.user)
    }
}
