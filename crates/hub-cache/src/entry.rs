//! Immutable cache entry snapshots
//!
//! A [`CacheEntry`] is an ordered, immutable snapshot of one cached
//! collection. Cloning is cheap (shared backing storage), and the backing
//! storage is never mutated in place; every cache write builds a new
//! entry. Rollback snapshots rely on this.

use hub_model::{Task, TaskId};
use std::sync::Arc;

/// Ordered, immutable snapshot of a task collection
#[derive(Debug, Clone)]
pub struct CacheEntry {
    tasks: Arc<[Task]>,
}

impl CacheEntry {
    /// Tasks in server order
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the snapshot
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the snapshot is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by id
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Whether a task with the id is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Copy the snapshot into an owned vector
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<Task> {
        self.tasks.to_vec()
    }

    /// Iterate over the tasks
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self {
            tasks: Arc::from(Vec::new()),
        }
    }
}

impl From<Vec<Task>> for CacheEntry {
    fn from(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::from(tasks),
        }
    }
}

impl PartialEq for CacheEntry {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks
    }
}

impl Eq for CacheEntry {}

impl<'a> IntoIterator for &'a CacheEntry {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_model::Category;

    fn task(id: &str) -> Task {
        Task {
            id: TaskId::from(id),
            text: format!("task {id}"),
            title: Category::Other,
            important: false,
            is_completed: false,
        }
    }

    #[test]
    fn preserves_order() {
        let entry = CacheEntry::from(vec![task("b"), task("a"), task("c")]);
        let ids: Vec<&str> = entry.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn find_by_id() {
        let entry = CacheEntry::from(vec![task("t1"), task("t2")]);
        assert!(entry.contains(&TaskId::from("t2")));
        assert!(entry.find(&TaskId::from("t3")).is_none());
    }

    #[test]
    fn clones_share_storage() {
        let entry = CacheEntry::from(vec![task("t1")]);
        let clone = entry.clone();
        assert_eq!(entry, clone);
        assert!(Arc::ptr_eq(&entry.tasks, &clone.tasks));
    }

    #[test]
    fn default_is_empty() {
        assert!(CacheEntry::default().is_empty());
        assert_eq!(CacheEntry::default().len(), 0);
    }
}
