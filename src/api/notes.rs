//! Sticky Note Endpoints

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};

use super::{ApiClient, ApiResult, NoteApi};
use crate::models::{NoteDraft, StickyNote};
use crate::storage::BlobStore;

impl<S: BlobStore> ApiClient<S> {
    pub(super) fn note_request(&self, method: Method, id: u64) -> RequestBuilder {
        self.request(method, &format!("/sticky-notes/{}", id))
    }
}

#[async_trait(?Send)]
impl<S: BlobStore> NoteApi for ApiClient<S> {
    async fn list_notes(&self) -> ApiResult<Vec<StickyNote>> {
        Self::send_json(self.request(Method::GET, "/sticky-notes")).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<StickyNote> {
        let req = self.request(Method::POST, "/sticky-notes").json(draft);
        Self::send_json(req).await
    }

    async fn update_note(&self, id: u64, draft: &NoteDraft) -> ApiResult<StickyNote> {
        let req = self.note_request(Method::PATCH, id).json(draft);
        Self::send_json(req).await
    }

    async fn delete_note(&self, id: u64) -> ApiResult<()> {
        Self::send(self.note_request(Method::DELETE, id)).await?;
        Ok(())
    }
}
