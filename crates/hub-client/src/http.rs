//! HTTP implementation of [`RemoteStore`]
//!
//! Talks to the backend's task routes:
//! - `GET    {base}/tasks/get/{user}`
//! - `POST   {base}/tasks/create`
//! - `PATCH  {base}/tasks/complete` / `PATCH {base}/tasks/important`
//! - `DELETE {base}/tasks/delete/{id}` (body carries the user id)
//!
//! Authorization is cookie-based; the client keeps a cookie store and
//! sends credentials with every request. Error bodies carry a `message`
//! field which is surfaced verbatim.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::RemoteStore;
use async_trait::async_trait;
use hub_model::{NewTask, Task, TaskId, ToggleField, UserId};
use serde::{Deserialize, Serialize};

/// Reqwest-backed remote store
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

/// Error body shape used by every backend route
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    user_id: &'a UserId,
    #[serde(flatten)]
    task: &'a NewTask,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleBody<'a> {
    user_id: &'a UserId,
    task_id: &'a TaskId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a> {
    user_id: &'a UserId,
}

impl HttpStore {
    /// Build a store from configuration
    ///
    /// # Errors
    /// `StoreError::Transport` if the underlying client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(StoreError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, StoreError> {
        let url = self.endpoint(&["tasks", "get", user.as_str()]);
        tracing::debug!(%user, "listing tasks");
        let resp = self.client.get(&url).send().await?;
        let tasks = Self::check(resp).await?.json::<Vec<Task>>().await?;
        Ok(tasks)
    }

    async fn create(&self, user: &UserId, task: NewTask) -> Result<Task, StoreError> {
        let url = self.endpoint(&["tasks", "create"]);
        tracing::debug!(%user, category = %task.title, "creating task");
        let body = CreateBody {
            user_id: user,
            task: &task,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        let created = Self::check(resp).await?.json::<Task>().await?;
        Ok(created)
    }

    async fn toggle_field(
        &self,
        user: &UserId,
        id: &TaskId,
        field: ToggleField,
    ) -> Result<Task, StoreError> {
        let url = self.endpoint(&["tasks", field.route_segment()]);
        tracing::debug!(%user, task = %id, ?field, "toggling task field");
        let body = ToggleBody {
            user_id: user,
            task_id: id,
        };
        let resp = self.client.patch(&url).json(&body).send().await?;
        let updated = Self::check(resp).await?.json::<Task>().await?;
        Ok(updated)
    }

    async fn delete(&self, user: &UserId, id: &TaskId) -> Result<(), StoreError> {
        let url = self.endpoint(&["tasks", "delete", id.as_str()]);
        tracing::debug!(%user, task = %id, "deleting task");
        let body = DeleteBody { user_id: user };
        let resp = self.client.delete(&url).json(&body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
