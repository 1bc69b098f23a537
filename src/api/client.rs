//! HTTP client for the remote task store

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::domain::{NewTask, Task, TaskId, TaskPatch};

/// CRUD operations against the service of record.
///
/// Each call makes a single attempt; failures are returned to the caller as-is.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by this client's user
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Persist a new task; the store assigns the id
    async fn create(&self, title: &str, completed: bool) -> Result<Task, ApiError>;

    /// Apply a partial update and return the stored task
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError>;

    async fn delete(&self, id: TaskId) -> Result<(), ApiError>;
}

/// `TaskStore` backed by the `/todos` REST endpoints
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
    user_id: u64,
}

impl HttpTaskStore {
    pub fn new(base_url: &str, user_id: u64, timeout: Duration) -> Result<Self, ApiError> {
        debug!(%base_url, user_id, ?timeout, "HttpTaskStore::new: called");
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("todos/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: TaskId) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

/// Turn a non-2xx response into `ApiError::Status`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %body, "task store returned error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        debug!(user_id = self.user_id, "HttpTaskStore::list: called");
        let response = self
            .client
            .get(self.todos_url())
            .query(&[("userId", self.user_id)])
            .send()
            .await?;
        decode(response).await
    }

    async fn create(&self, title: &str, completed: bool) -> Result<Task, ApiError> {
        debug!(%title, completed, "HttpTaskStore::create: called");
        let body = NewTask {
            title: title.to_string(),
            completed,
            user_id: self.user_id,
        };
        let response = self.client.post(self.todos_url()).json(&body).send().await?;
        decode(response).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        debug!(%id, ?patch, "HttpTaskStore::update: called");
        let response = self.client.patch(self.todo_url(id)).json(patch).send().await?;
        decode(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        debug!(%id, "HttpTaskStore::delete: called");
        let response = self.client.delete(self.todo_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
