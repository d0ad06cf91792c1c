//! View-layer bindings
//!
//! A [`CollectionView`] subscribes to one cache key and re-renders on
//! every replacement of that entry, whether it came from an optimistic
//! write, a rollback, or a refetch. Derived aggregates are computed by
//! pure filtering over the current snapshot.

use hub_cache::{CacheEntry, QueryCache};
use hub_model::{QueryKey, Task};
use tokio::sync::watch;

/// Derived task counts for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskTotals {
    /// Tasks not yet completed
    pub pending: usize,
    /// Completed tasks
    pub completed: usize,
}

impl TaskTotals {
    /// Tally a collection
    #[must_use]
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut totals = Self::default();
        for task in tasks {
            if task.is_completed {
                totals.completed += 1;
            } else {
                totals.pending += 1;
            }
        }
        totals
    }

    /// Total number of tasks
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.completed
    }
}

/// A live view over one cached collection
#[derive(Debug)]
pub struct CollectionView {
    rx: watch::Receiver<CacheEntry>,
}

impl CollectionView {
    /// Subscribe to the entry under `key`
    #[must_use]
    pub fn new(cache: &QueryCache, key: &QueryKey) -> Self {
        Self {
            rx: cache.subscribe(key),
        }
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> CacheEntry {
        self.rx.borrow().clone()
    }

    /// Derived counts for the current snapshot
    #[must_use]
    pub fn totals(&self) -> TaskTotals {
        TaskTotals::tally(self.rx.borrow().iter())
    }

    /// Wait for the next replacement
    ///
    /// Returns `false` once the cache entry is gone (sender dropped);
    /// a render loop should exit then.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_model::UserId;
    use hub_test_utils::{completed_task, sample_task};

    fn key() -> QueryKey {
        QueryKey::tasks(UserId::from("u1"))
    }

    #[test]
    fn totals_of_empty_collection() {
        let none: Vec<Task> = Vec::new();
        let totals = TaskTotals::tally(&none);
        assert_eq!(totals, TaskTotals::default());
        assert_eq!(totals.total(), 0);
    }

    #[test]
    fn pending_is_total_minus_completed() {
        let tasks = vec![
            sample_task("t1", "a"),
            completed_task("t2", "b"),
            sample_task("t3", "c"),
            completed_task("t4", "d"),
        ];
        let totals = TaskTotals::tally(&tasks);
        assert_eq!(totals.completed, 2);
        assert_eq!(totals.pending, totals.total() - totals.completed);
    }

    #[tokio::test]
    async fn view_tracks_cache_writes() {
        let cache = QueryCache::new();
        let mut view = CollectionView::new(&cache, &key());
        assert_eq!(view.totals().total(), 0);

        cache.set(&key(), vec![sample_task("t1", "a"), completed_task("t2", "b")]);
        assert!(view.changed().await);
        let totals = view.totals();
        assert_eq!(totals.pending, 1);
        assert_eq!(totals.completed, 1);
        assert_eq!(view.snapshot().len(), 2);
    }
}
