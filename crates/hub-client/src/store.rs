//! The remote store contract
//!
//! One method per backend operation the sync core uses. Implementations
//! perform exactly one round trip per call and never retry; the trait is
//! object-safe so the coordinator can hold `Arc<dyn RemoteStore>`.

use crate::error::StoreError;
use async_trait::async_trait;
use hub_model::{NewTask, Task, TaskId, ToggleField, UserId};

/// Client-side contract for the task backend
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the user's full task list
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, StoreError>;

    /// Create a task; the server assigns the id
    async fn create(&self, user: &UserId, task: NewTask) -> Result<Task, StoreError>;

    /// Toggle one of the task's flags, returning the updated task
    async fn toggle_field(
        &self,
        user: &UserId,
        id: &TaskId,
        field: ToggleField,
    ) -> Result<Task, StoreError>;

    /// Delete a task
    async fn delete(&self, user: &UserId, id: &TaskId) -> Result<(), StoreError>;
}
