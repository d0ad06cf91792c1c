//! Optimistic mutation coordinator
//!
//! Applies a local, unconfirmed edit to the cached collection the moment
//! a mutation starts, so the view reflects the intended end state with no
//! perceived latency, then reconciles with the server:
//!
//! 1. snapshot the current entry (rollback point)
//! 2. write the edited entry
//! 3. issue the remote call
//! 4. success: invalidate the key, publish a success notice
//! 5. failure: restore the snapshot, publish the error, log it
//! 6. either way the key ends stale, so a refetch supersedes both the
//!    optimistic and rolled-back states with ground truth
//!
//! Create is deliberately not optimistic: the id is server-assigned, so
//! the coordinator waits for the created task and invalidates afterward.
//!
//! Two mutations on the same key may be in flight at once; each carries
//! its own snapshot and whichever settles last wins. A delete failing
//! after a toggle's rollback can therefore resurrect state; see DESIGN.md
//! for why this is kept rather than fixed.

use crate::edits;
use crate::notices::NoticeBus;
use crate::state::{PendingMutation, Settlement};
use hub_cache::{CacheEntry, QueryCache};
use hub_client::{RemoteStore, StoreError};
use hub_model::{NewTask, QueryKey, ResourceKind, Scope, Task, TaskId, ToggleField, UserId};
use std::future::Future;
use std::sync::Arc;

/// How one optimistic mutation ended
#[derive(Debug)]
pub enum MutationOutcome {
    /// Server confirmed the edit
    Applied {
        /// Updated task returned by the server (absent for delete)
        task: Option<Task>,
    },
    /// Server refused or was unreachable; the snapshot was restored
    RolledBack {
        /// The failure that forced the rollback
        error: StoreError,
    },
}

impl MutationOutcome {
    /// Whether the edit stood
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Whether the edit was rolled back
    #[inline]
    #[must_use]
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }

    /// The failure, if the mutation rolled back
    #[must_use]
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Applied { .. } => None,
            Self::RolledBack { error } => Some(error),
        }
    }
}

/// Orchestrates create/toggle/delete against the cache and the store
///
/// Every operation takes the user id explicitly; there is no ambient
/// session state.
pub struct MutationCoordinator {
    cache: Arc<QueryCache>,
    store: Arc<dyn RemoteStore>,
    notices: NoticeBus,
}

impl MutationCoordinator {
    /// Create a coordinator
    #[must_use]
    pub fn new(cache: Arc<QueryCache>, store: Arc<dyn RemoteStore>, notices: NoticeBus) -> Self {
        Self {
            cache,
            store,
            notices,
        }
    }

    /// Fetch a user's tasks and populate the cache entry for the scope
    ///
    /// # Errors
    /// Propagates the store error; the cache is left untouched on failure.
    pub async fn hydrate(&self, user: &UserId, scope: Scope) -> Result<CacheEntry, StoreError> {
        let tasks = self.store.list(user).await?;
        let tasks = edits::filter_scope(tasks, &scope);
        let key = key_for(user, scope);
        self.cache.set(&key, tasks);
        Ok(self.cache.get(&key).unwrap_or_default())
    }

    /// Create a task; NOT optimistic
    ///
    /// Waits for the server-assigned id, then invalidates the key so the
    /// view refetches and shows the now-real entry.
    ///
    /// # Errors
    /// `StoreError::Precondition` if the text is blank (no request is
    /// made); otherwise the store error.
    pub async fn create(
        &self,
        user: &UserId,
        scope: Scope,
        draft: NewTask,
    ) -> Result<Task, StoreError> {
        if draft.text.trim().is_empty() {
            return Err(StoreError::Precondition(
                "task text must not be empty".to_string(),
            ));
        }
        let key = key_for(user, scope);
        match self.store.create(user, draft).await {
            Ok(created) => {
                self.cache.invalidate(&key);
                self.notices.info("task added");
                Ok(created)
            }
            Err(error) => {
                tracing::error!(%key, %error, "create failed");
                self.notices.error(error.user_message());
                Err(error)
            }
        }
    }

    /// Optimistically toggle the completion flag
    pub async fn toggle_completed(
        &self,
        user: &UserId,
        scope: Scope,
        id: &TaskId,
    ) -> MutationOutcome {
        self.toggle(user, scope, id, ToggleField::Completed).await
    }

    /// Optimistically toggle the important flag
    pub async fn toggle_important(
        &self,
        user: &UserId,
        scope: Scope,
        id: &TaskId,
    ) -> MutationOutcome {
        self.toggle(user, scope, id, ToggleField::Important).await
    }

    async fn toggle(
        &self,
        user: &UserId,
        scope: Scope,
        id: &TaskId,
        field: ToggleField,
    ) -> MutationOutcome {
        let key = key_for(user, scope);
        let previous = self.cache.get(&key).unwrap_or_default();
        let edited = edits::toggle_task(previous.tasks(), id, field);
        let call = async {
            self.store
                .toggle_field(user, id, field)
                .await
                .map(Some)
        };
        self.run_optimistic(key, previous, edited, call, "task updated")
            .await
    }

    /// Optimistically delete a task
    pub async fn delete(&self, user: &UserId, scope: Scope, id: &TaskId) -> MutationOutcome {
        let key = key_for(user, scope);
        let previous = self.cache.get(&key).unwrap_or_default();
        let edited = edits::remove_task(previous.tasks(), id);
        let call = async { self.store.delete(user, id).await.map(|()| None) };
        self.run_optimistic(key, previous, edited, call, "task deleted")
            .await
    }

    /// Shared optimistic protocol: speculative write, remote call,
    /// invalidate on success, restore-then-invalidate on failure.
    async fn run_optimistic(
        &self,
        key: QueryKey,
        previous: CacheEntry,
        edited: Vec<Task>,
        call: impl Future<Output = Result<Option<Task>, StoreError>>,
        success_notice: &str,
    ) -> MutationOutcome {
        let mutation = PendingMutation::begin(key.clone(), previous);
        self.cache.overlay(&key, edited);
        tracing::debug!(%key, "applied optimistic edit");

        match call.await {
            Ok(task) => {
                let settled = mutation.settle(Settlement::Applied);
                self.cache.invalidate(settled.key());
                self.notices.info(success_notice);
                MutationOutcome::Applied { task }
            }
            Err(error) => {
                let settled = mutation.settle(Settlement::RolledBack);
                tracing::error!(%key, %error, "mutation failed, rolling back");
                self.cache.overlay(&key, settled.into_previous());
                self.cache.invalidate(&key);
                self.notices.error(error.user_message());
                MutationOutcome::RolledBack { error }
            }
        }
    }
}

fn key_for(user: &UserId, scope: Scope) -> QueryKey {
    QueryKey {
        resource: ResourceKind::Tasks,
        scope,
        user: user.clone(),
    }
}
