//! Background refetch worker
//!
//! Consumes the cache's stale-key channel and replaces each invalidated
//! entry with authoritative server state. One invalidation transition
//! yields one refetch; a failed refetch is logged and the entry stays
//! stale, with no retry.

use crate::edits;
use hub_cache::QueryCache;
use hub_client::RemoteStore;
use hub_model::{QueryKey, ResourceKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Replaces stale cache entries with fetched server state
pub struct RefetchWorker {
    cache: Arc<QueryCache>,
    store: Arc<dyn RemoteStore>,
}

impl RefetchWorker {
    /// Create a worker
    #[must_use]
    pub fn new(cache: Arc<QueryCache>, store: Arc<dyn RemoteStore>) -> Self {
        Self { cache, store }
    }

    /// Run the worker on a background task until the channel closes
    pub fn spawn(self, rx: mpsc::UnboundedReceiver<QueryKey>) -> JoinHandle<()> {
        tokio::spawn(self.run(rx))
    }

    async fn run(self, mut rx: mpsc::UnboundedReceiver<QueryKey>) {
        while let Some(key) = rx.recv().await {
            self.refetch(&key).await;
        }
        tracing::debug!("refetch channel closed, worker exiting");
    }

    async fn refetch(&self, key: &QueryKey) {
        if key.resource != ResourceKind::Tasks {
            tracing::warn!(%key, "refetch requested for uncached resource kind");
            return;
        }
        match self.store.list(&key.user).await {
            Ok(tasks) => {
                let tasks = edits::filter_scope(tasks, &key.scope);
                self.cache.set(key, tasks);
                tracing::debug!(%key, "refetched entry");
            }
            Err(error) => {
                // Entry stays stale; a later invalidation will try again.
                tracing::warn!(%key, %error, "refetch failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_test_utils::{sample_task, sample_user, InMemoryStore, StoreOp};

    #[tokio::test]
    async fn refetch_replaces_stale_entry() {
        let user = sample_user();
        let store = Arc::new(InMemoryStore::seeded(
            &user,
            vec![sample_task("t1", "write report")],
        ));
        let cache = Arc::new(QueryCache::new());
        let rx = cache.attach_refetch_channel();

        let key = QueryKey::tasks(user.clone());
        let mut sub = cache.subscribe(&key);
        cache.set(&key, vec![]);
        let handle = RefetchWorker::new(cache.clone(), store).spawn(rx);

        cache.invalidate(&key);

        while cache.get(&key).unwrap().is_empty() {
            sub.changed().await.unwrap();
        }
        assert_eq!(cache.get(&key).unwrap().len(), 1);
        assert!(!cache.is_stale(&key));
        handle.abort();
    }

    #[tokio::test]
    async fn failed_refetch_leaves_entry_stale() {
        let user = sample_user();
        let store = Arc::new(InMemoryStore::seeded(
            &user,
            vec![sample_task("t1", "write report")],
        ));
        store.fail_next(
            StoreOp::List,
            hub_client::StoreError::Transport("connection refused".to_string()),
        );
        let cache = Arc::new(QueryCache::new());
        let _rx = cache.attach_refetch_channel();

        let key = QueryKey::tasks(user.clone());
        let _sub = cache.subscribe(&key);
        cache.set(&key, vec![]);

        let worker = RefetchWorker::new(cache.clone(), store.clone());
        cache.invalidate(&key);
        // Drive the single refetch directly so there is no task to race.
        worker.refetch(&key).await;

        assert!(cache.is_stale(&key));
        assert!(cache.get(&key).unwrap().is_empty());
        assert_eq!(store.counts().list, 1);
    }

    #[tokio::test]
    async fn scoped_key_refetches_only_its_slice() {
        use hub_model::Category;
        let user = sample_user();
        let mut study = sample_task("t2", "read chapter");
        study.title = Category::Study;
        let store = Arc::new(InMemoryStore::seeded(
            &user,
            vec![sample_task("t1", "write report"), study],
        ));
        let cache = Arc::new(QueryCache::new());

        let key = QueryKey::tasks_in(user.clone(), Category::Study);
        let worker = RefetchWorker::new(cache.clone(), store);
        worker.refetch(&key).await;

        let entry = cache.get(&key).unwrap();
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.tasks()[0].title, Category::Study);
    }
}
