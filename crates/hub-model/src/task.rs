//! Task records and category tags
//!
//! Mirrors the wire representation used by the task backend: ids are
//! server-assigned strings, the category tag travels in the `title` field,
//! and completion state is camelCased as `isCompleted`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned task identifier
///
/// Opaque to the client; minted by the backend on create, never locally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an identifier received from the backend
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

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Category tag attached to every task
///
/// Fixed small set; travels in the `title` field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Work-related task
    Work,
    /// Personal errands and life admin
    Personal,
    /// Study / learning
    Study,
    /// Health and fitness
    Health,
    /// One-off errand
    Errand,
    /// Anything else
    Other,
}

impl Category {
    /// Wire string for this category
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Study => "study",
            Self::Health => "health",
            Self::Errand => "errand",
            Self::Other => "other",
        }
    }

    /// All categories, in display order
    #[inline]
    #[must_use]
    pub fn all() -> &'static [Category] {
        &[
            Self::Work,
            Self::Personal,
            Self::Study,
            Self::Health,
            Self::Errand,
            Self::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category tag
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "study" => Ok(Self::Study),
            "health" => Ok(Self::Health),
            "errand" => Ok(Self::Errand),
            "other" => Ok(Self::Other),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// A task as stored by the backend and cached by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: TaskId,
    /// Free-form task text
    pub text: String,
    /// Category tag (the backend calls this field `title`)
    pub title: Category,
    /// Starred / high-priority flag
    pub important: bool,
    /// Completion flag
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl Task {
    /// Flip one of the two toggleable flags, returning the new task
    #[inline]
    #[must_use]
    pub fn with_toggled(mut self, field: ToggleField) -> Self {
        match field {
            ToggleField::Completed => self.is_completed = !self.is_completed,
            ToggleField::Important => self.important = !self.important,
        }
        self
    }
}

/// Payload for creating a task; the id is assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Free-form task text
    pub text: String,
    /// Category tag
    pub title: Category,
    /// Starred / high-priority flag
    pub important: bool,
}

impl NewTask {
    /// Create a new-task payload
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, title: Category) -> Self {
        Self {
            text: text.into(),
            title,
            important: false,
        }
    }

    /// Mark as important
    #[inline]
    #[must_use]
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// The two task flags that support toggle endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleField {
    /// `isCompleted` flag, toggled via `PATCH /tasks/complete`
    Completed,
    /// `important` flag, toggled via `PATCH /tasks/important`
    Important,
}

impl ToggleField {
    /// Path segment for this field's PATCH route
    #[inline]
    #[must_use]
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Completed => "complete",
            Self::Important => "important",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task {
            id: TaskId::from(id),
            text: "water the plants".to_string(),
            title: Category::Personal,
            important: false,
            is_completed: false,
        }
    }

    #[test]
    fn category_round_trips_through_str() {
        for cat in Category::all() {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), *cat);
        }
    }

    #[test]
    fn category_rejects_unknown_tag() {
        assert!("urgent".parse::<Category>().is_err());
    }

    #[test]
    fn task_wire_shape() {
        let json = serde_json::to_value(task("t1")).unwrap();
        assert_eq!(json["_id"], "t1");
        assert_eq!(json["title"], "personal");
        assert_eq!(json["isCompleted"], false);
    }

    #[test]
    fn task_parses_backend_body() {
        let body = r#"{
            "_id": "64acb1",
            "text": "ship the report",
            "title": "work",
            "important": true,
            "isCompleted": false
        }"#;
        let t: Task = serde_json::from_str(body).unwrap();
        assert_eq!(t.id.as_str(), "64acb1");
        assert_eq!(t.title, Category::Work);
        assert!(t.important);
    }

    #[test]
    fn toggle_flips_exactly_one_field() {
        let t = task("t1").with_toggled(ToggleField::Completed);
        assert!(t.is_completed);
        assert!(!t.important);

        let t = t.with_toggled(ToggleField::Important);
        assert!(t.is_completed);
        assert!(t.important);
    }

    #[test]
    fn double_toggle_is_identity() {
        let original = task("t1");
        let toggled = original
            .clone()
            .with_toggled(ToggleField::Completed)
            .with_toggled(ToggleField::Completed);
        assert_eq!(original, toggled);
    }
}
