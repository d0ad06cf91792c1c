//! Testing utilities for the DeskHub workspace
//!
//! Shared fixtures plus [`InMemoryStore`], a deterministic [`RemoteStore`]
//! with scripted failure injection and per-call gates for exercising
//! in-flight mutation states.

#![allow(missing_docs)]

use async_trait::async_trait;
use hub_client::{RemoteStore, StoreError};
use hub_model::{Category, NewTask, Task, TaskId, ToggleField, UserId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

/// Which store operation a scripted failure or gate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Create,
    Toggle,
    Delete,
}

/// Call counts per operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub create: usize,
    pub toggle: usize,
    pub delete: usize,
}

/// Releases one gated store call
///
/// The call proceeds once [`release`](Gate::release) runs; releasing
/// before the call arrives is fine (the permit is stored).
#[derive(Debug, Clone)]
pub struct Gate {
    notify: Arc<Notify>,
}

impl Gate {
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

#[derive(Default)]
struct StoreState {
    tasks: HashMap<UserId, Vec<Task>>,
    failures: HashMap<StoreOp, VecDeque<StoreError>>,
    gates: HashMap<StoreOp, VecDeque<Arc<Notify>>>,
    counts: CallCounts,
}

/// Deterministic in-memory remote store
///
/// Behaves like the backend for the operations the sync core uses:
/// server-assigned ids, per-user task lists, `message`-bearing failures
/// when scripted.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one user's tasks
    #[must_use]
    pub fn seeded(user: &UserId, tasks: Vec<Task>) -> Self {
        let store = Self::new();
        store.state.lock().tasks.insert(user.clone(), tasks);
        store
    }

    /// Script the next call to `op` to fail with `error`
    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        self.state
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(error);
    }

    /// Hold the next call to `op` until the returned gate is released
    pub fn hold_next(&self, op: StoreOp) -> Gate {
        let notify = Arc::new(Notify::new());
        self.state
            .lock()
            .gates
            .entry(op)
            .or_default()
            .push_back(notify.clone());
        Gate { notify }
    }

    /// Calls observed so far
    #[must_use]
    pub fn counts(&self) -> CallCounts {
        self.state.lock().counts
    }

    /// Current server-side tasks for a user
    #[must_use]
    pub fn tasks_of(&self, user: &UserId) -> Vec<Task> {
        self.state.lock().tasks.get(user).cloned().unwrap_or_default()
    }

    async fn enter(&self, op: StoreOp) -> Result<(), StoreError> {
        let gate = {
            let mut state = self.state.lock();
            match op {
                StoreOp::List => state.counts.list += 1,
                StoreOp::Create => state.counts.create += 1,
                StoreOp::Toggle => state.counts.toggle += 1,
                StoreOp::Delete => state.counts.delete += 1,
            }
            state.gates.get_mut(&op).and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let failure = {
            let mut state = self.state.lock();
            state.failures.get_mut(&op).and_then(VecDeque::pop_front)
        };
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, StoreError> {
        self.enter(StoreOp::List).await?;
        Ok(self.tasks_of(user))
    }

    async fn create(&self, user: &UserId, task: NewTask) -> Result<Task, StoreError> {
        self.enter(StoreOp::Create).await?;
        let created = Task {
            id: TaskId::new(uuid::Uuid::new_v4().to_string()),
            text: task.text,
            title: task.title,
            important: task.important,
            is_completed: false,
        };
        self.state
            .lock()
            .tasks
            .entry(user.clone())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn toggle_field(
        &self,
        user: &UserId,
        id: &TaskId,
        field: ToggleField,
    ) -> Result<Task, StoreError> {
        self.enter(StoreOp::Toggle).await?;
        let mut state = self.state.lock();
        let tasks = state.tasks.entry(user.clone()).or_default();
        let task = tasks.iter_mut().find(|t| &t.id == id).ok_or_else(|| {
            StoreError::Server {
                status: 404,
                message: "task not found".to_string(),
            }
        })?;
        *task = task.clone().with_toggled(field);
        Ok(task.clone())
    }

    async fn delete(&self, user: &UserId, id: &TaskId) -> Result<(), StoreError> {
        self.enter(StoreOp::Delete).await?;
        let mut state = self.state.lock();
        let tasks = state.tasks.entry(user.clone()).or_default();
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() == before {
            return Err(StoreError::Server {
                status: 404,
                message: "task not found".to_string(),
            });
        }
        Ok(())
    }
}

/// A task fixture with sensible defaults
#[must_use]
pub fn sample_task(id: &str, text: &str) -> Task {
    Task {
        id: TaskId::from(id),
        text: text.to_string(),
        title: Category::Work,
        important: false,
        is_completed: false,
    }
}

/// A completed task fixture
#[must_use]
pub fn completed_task(id: &str, text: &str) -> Task {
    Task {
        is_completed: true,
        ..sample_task(id, text)
    }
}

/// The user every fixture belongs to
#[must_use]
pub fn sample_user() -> UserId {
    UserId::from("user-1")
}
