//! Task Endpoints
//!
//! `GET/POST /tasks`, `PATCH/DELETE /tasks/{id}`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};

use super::{ApiClient, ApiResult, TaskApi};
use crate::models::{Task, TaskDraft, TaskPage, TaskPatch, TaskQuery};
use crate::storage::BlobStore;

impl<S: BlobStore> ApiClient<S> {
    pub(super) fn list_tasks_request(&self, query: &TaskQuery) -> RequestBuilder {
        self.request(Method::GET, "/tasks").query(&query.to_pairs())
    }

    pub(super) fn task_request(&self, method: Method, id: u64) -> RequestBuilder {
        self.request(method, &format!("/tasks/{}", id))
    }
}

#[async_trait(?Send)]
impl<S: BlobStore> TaskApi for ApiClient<S> {
    async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<TaskPage> {
        Self::send_json(self.list_tasks_request(query)).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        let req = self.request(Method::POST, "/tasks").json(draft);
        Self::send_json(req).await
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task> {
        let req = self.task_request(Method::PATCH, id).json(patch);
        Self::send_json(req).await
    }

    async fn delete_task(&self, id: u64) -> ApiResult<()> {
        Self::send(self.task_request(Method::DELETE, id)).await?;
        Ok(())
    }
}
