//! Account Endpoints
//!
//! Registration and login. The token returned by `/auth` is what
//! [`ApiClient`] later attaches as the bearer credential.

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiResult, AuthApi};
use crate::models::{AuthResponse, Credentials, NewUser, UserProfile};
use crate::storage::BlobStore;

#[async_trait(?Send)]
impl<S: BlobStore> AuthApi for ApiClient<S> {
    async fn register(&self, user: &NewUser) -> ApiResult<UserProfile> {
        let req = self.request(Method::POST, "/users").json(user);
        Self::send_json(req).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let req = self.request(Method::POST, "/auth").json(credentials);
        Self::send_json(req).await
    }
}
