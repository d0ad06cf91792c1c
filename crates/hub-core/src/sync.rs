//! Wiring for one dashboard session
//!
//! [`SyncCore`] owns the cache, the coordinator, the notice bus, and the
//! refetch worker handle for a running session. Construction is cheap;
//! [`SyncCore::start_refetch`] attaches the stale-key channel and spawns
//! the worker.

use crate::coordinator::MutationCoordinator;
use crate::notices::NoticeBus;
use crate::refetch::RefetchWorker;
use crate::view::CollectionView;
use hub_cache::QueryCache;
use hub_client::RemoteStore;
use hub_model::{QueryKey, Scope, UserId};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything one dashboard session needs to read and mutate tasks
pub struct SyncCore {
    cache: Arc<QueryCache>,
    store: Arc<dyn RemoteStore>,
    notices: NoticeBus,
    coordinator: MutationCoordinator,
}

impl SyncCore {
    /// Wire a session around a remote store
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        let cache = Arc::new(QueryCache::new());
        let notices = NoticeBus::new();
        let coordinator =
            MutationCoordinator::new(cache.clone(), store.clone(), notices.clone());
        Self {
            cache,
            store,
            notices,
            coordinator,
        }
    }

    /// Attach the stale-key channel and spawn the refetch worker
    ///
    /// Call once per session, from within a tokio runtime.
    pub fn start_refetch(&self) -> JoinHandle<()> {
        let rx = self.cache.attach_refetch_channel();
        RefetchWorker::new(self.cache.clone(), self.store.clone()).spawn(rx)
    }

    /// The shared cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// The mutation coordinator
    #[inline]
    #[must_use]
    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }

    /// The notice bus
    #[inline]
    #[must_use]
    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    /// A live view over one user's tasks in a scope
    #[must_use]
    pub fn view(&self, user: &UserId, scope: Scope) -> CollectionView {
        let key = QueryKey {
            resource: hub_model::ResourceKind::Tasks,
            scope,
            user: user.clone(),
        };
        CollectionView::new(&self.cache, &key)
    }
}
