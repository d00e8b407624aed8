//! REST API Client
//!
//! HTTP bindings to the remote task service, organized by domain. The
//! stores talk to the traits below so tests can swap in a scripted fake.

mod auth;
mod notes;
mod tasks;

use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{ApiConfig, TOKEN_KEY};
use crate::models::{
    AuthResponse, Credentials, NewUser, NoteDraft, StickyNote, Task, TaskDraft, TaskPage, TaskPatch,
    TaskQuery, UserProfile,
};
use crate::storage::BlobStore;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("client setup failed: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

// ========================
// Service Traits
// ========================

#[async_trait(?Send)]
pub trait TaskApi {
    async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<TaskPage>;
    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task>;
    async fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task>;
    async fn delete_task(&self, id: u64) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait NoteApi {
    async fn list_notes(&self) -> ApiResult<Vec<StickyNote>>;
    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<StickyNote>;
    async fn update_note(&self, id: u64, draft: &NoteDraft) -> ApiResult<StickyNote>;
    async fn delete_note(&self, id: u64) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait AuthApi {
    async fn register(&self, user: &NewUser) -> ApiResult<UserProfile>;
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;
}

// ========================
// HTTP Client
// ========================

/// `reqwest` client that signs requests with the stored bearer token
#[derive(Clone)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    config: ApiConfig,
    storage: S,
}

impl<S: BlobStore> ApiClient<S> {
    pub fn new(config: ApiConfig, storage: S) -> ApiResult<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder.build().map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { http, config, storage })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.config.url(path));
        match self.storage.get(TOKEN_KEY) {
            Some(token) if !token.is_empty() => {
                req.header(header::AUTHORIZATION, format!("Bearer {}", token))
            }
            _ => req,
        }
    }

    async fn send(req: RequestBuilder) -> ApiResult<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<T> {
        let text = Self::send(req).await?.text().await?;
        decode(&text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    Ok(serde_json::from_str(text)?)
}
