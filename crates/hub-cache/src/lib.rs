//! Keyed query cache with staleness and subscriptions
//!
//! An in-memory map from [`QueryKey`] to an immutable snapshot of a task
//! collection. Entries are fresh until a settled mutation invalidates
//! them; invalidation pushes the key to a stale-key channel so a refetch
//! worker can replace the entry with ground truth. Views subscribe per
//! key and observe every replacement (optimistic write, rollback, or
//! refetch).

#![warn(unreachable_pub)]

pub mod entry;

pub use entry::CacheEntry;

use dashmap::DashMap;
use hub_model::QueryKey;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

/// Freshness of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Reflects the last fetched server state (plus any unconfirmed
    /// optimistic overlay)
    Fresh,
    /// Superseded by a settled mutation; a refetch is owed
    Stale,
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in the cache
    pub entry_count: usize,
    /// Number of entries currently marked stale
    pub stale_count: usize,
}

#[derive(Debug)]
struct Slot {
    value: CacheEntry,
    freshness: Freshness,
    tx: watch::Sender<CacheEntry>,
}

impl Slot {
    fn empty() -> Self {
        let (tx, _rx) = watch::channel(CacheEntry::default());
        Self {
            value: CacheEntry::default(),
            freshness: Freshness::Fresh,
            tx,
        }
    }
}

/// In-memory keyed cache of fetched collections
///
/// Writes always replace the whole entry (copy-on-write); a reader
/// holding a previously returned snapshot is never affected by a later
/// write. That discipline is what makes rollback snapshots safe.
#[derive(Debug, Default)]
pub struct QueryCache {
    slots: DashMap<QueryKey, Slot>,
    stale_tx: Mutex<Option<mpsc::UnboundedSender<QueryKey>>>,
}

impl QueryCache {
    /// Create an empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot under the key, if any has been written
    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.slots.get(key).map(|slot| slot.value.clone())
    }

    /// Authoritative write: replace the entry, mark it fresh, notify
    /// subscribers. Used for fetched server state.
    pub fn set(&self, key: &QueryKey, value: impl Into<CacheEntry>) {
        let value = value.into();
        let mut slot = self.slots.entry(key.clone()).or_insert_with(Slot::empty);
        slot.value = value.clone();
        slot.freshness = Freshness::Fresh;
        slot.tx.send_replace(value);
    }

    /// Speculative write: replace the entry and notify subscribers
    /// without touching freshness. Used for optimistic overlays and for
    /// rollback restores; neither claims to be server state.
    pub fn overlay(&self, key: &QueryKey, value: impl Into<CacheEntry>) {
        let value = value.into();
        let mut slot = self.slots.entry(key.clone()).or_insert_with(Slot::empty);
        slot.value = value.clone();
        slot.tx.send_replace(value);
    }

    /// Mark the entry stale. On the fresh-to-stale transition, if any
    /// subscriber is active and a refetch worker is attached, the key is
    /// pushed to the stale-key channel exactly once.
    ///
    /// Returns `true` if a refetch was scheduled.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut slot = self.slots.entry(key.clone()).or_insert_with(Slot::empty);
        if slot.freshness == Freshness::Stale {
            return false;
        }
        slot.freshness = Freshness::Stale;
        if slot.tx.receiver_count() == 0 {
            return false;
        }
        drop(slot);
        let guard = self.stale_tx.lock();
        if let Some(tx) = guard.as_ref() {
            if tx.send(key.clone()).is_ok() {
                tracing::debug!(%key, "scheduled refetch");
                return true;
            }
        }
        false
    }

    /// Whether the entry under the key is stale
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.freshness == Freshness::Stale)
    }

    /// Subscribe to every replacement of the entry under the key
    ///
    /// Creates an empty entry if none exists yet. The receiver yields the
    /// current snapshot immediately and a new one on every write.
    #[must_use]
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<CacheEntry> {
        let slot = self.slots.entry(key.clone()).or_insert_with(Slot::empty);
        slot.tx.subscribe()
    }

    /// Attach the stale-key channel consumed by the refetch worker
    pub fn attach_refetch_channel(&self) -> mpsc::UnboundedReceiver<QueryKey> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.stale_tx.lock() = Some(tx);
        rx
    }

    /// Drop the entry under the key entirely
    pub fn remove(&self, key: &QueryKey) {
        self.slots.remove(key);
    }

    /// Number of entries in the cache
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.slots.len()
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let stale_count = self
            .slots
            .iter()
            .filter(|slot| slot.freshness == Freshness::Stale)
            .count();
        CacheStats {
            entry_count: self.slots.len(),
            stale_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_model::{Category, Task, TaskId, UserId};

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: format!("task {id}"),
            title: Category::Work,
            important: false,
            is_completed: completed,
        }
    }

    fn key() -> QueryKey {
        QueryKey::tasks(UserId::from("u1"))
    }

    #[test]
    fn get_returns_none_for_missing() {
        let cache = QueryCache::new();
        assert!(cache.get(&key()).is_none());
    }

    #[test]
    fn set_then_get() {
        let cache = QueryCache::new();
        cache.set(&key(), vec![task("t1", false)]);
        let entry = cache.get(&key()).unwrap();
        assert_eq!(entry.len(), 1);
        assert!(!cache.is_stale(&key()));
    }

    #[test]
    fn snapshots_are_unaffected_by_later_writes() {
        let cache = QueryCache::new();
        cache.set(&key(), vec![task("t1", false), task("t2", false)]);
        let before = cache.get(&key()).unwrap();

        cache.overlay(&key(), vec![task("t1", false)]);

        assert_eq!(before.len(), 2);
        assert_eq!(cache.get(&key()).unwrap().len(), 1);
    }

    #[test]
    fn overlay_preserves_freshness() {
        let cache = QueryCache::new();
        cache.set(&key(), vec![task("t1", false)]);
        cache.overlay(&key(), vec![]);
        assert!(!cache.is_stale(&key()));
    }

    #[test]
    fn invalidate_marks_stale_and_set_restores_fresh() {
        let cache = QueryCache::new();
        cache.set(&key(), vec![task("t1", false)]);
        cache.invalidate(&key());
        assert!(cache.is_stale(&key()));

        cache.set(&key(), vec![task("t1", true)]);
        assert!(!cache.is_stale(&key()));
    }

    #[tokio::test]
    async fn invalidate_schedules_refetch_once() {
        let cache = QueryCache::new();
        let mut rx = cache.attach_refetch_channel();
        let _sub = cache.subscribe(&key());
        cache.set(&key(), vec![task("t1", false)]);

        assert!(cache.invalidate(&key()));
        // Already stale: no second refetch owed.
        assert!(!cache.invalidate(&key()));

        assert_eq!(rx.recv().await, Some(key()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn invalidate_without_subscriber_schedules_nothing() {
        let cache = QueryCache::new();
        let mut rx = cache.attach_refetch_channel();
        cache.set(&key(), vec![task("t1", false)]);

        assert!(!cache.invalidate(&key()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn subscribers_observe_every_replacement() {
        let cache = QueryCache::new();
        let mut rx = cache.subscribe(&key());
        assert!(rx.borrow().is_empty());

        cache.set(&key(), vec![task("t1", false)]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        cache.overlay(&key(), vec![task("t1", true), task("t2", false)]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 2);
    }

    #[test]
    fn stats_counts_stale_entries() {
        let cache = QueryCache::new();
        let k1 = QueryKey::tasks(UserId::from("u1"));
        let k2 = QueryKey::tasks(UserId::from("u2"));
        cache.set(&k1, vec![task("t1", false)]);
        cache.set(&k2, vec![task("t2", false)]);
        cache.invalidate(&k1);

        let stats = cache.stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.stale_count, 1);
    }
}
