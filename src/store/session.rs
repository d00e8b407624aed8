//! Session Store
//!
//! Sign-up, sign-in and sign-out. The bearer token lives under the `token`
//! storage key where [`crate::api::ApiClient`] picks it up.

use crate::api::{ApiResult, AuthApi};
use crate::config::{TOKEN_KEY, USER_KEY};
use crate::models::{Credentials, NewUser, UserProfile};
use crate::storage::{read_json, remove_key, write_json, BlobStore};

pub struct SessionStore<A, S> {
    api: A,
    storage: S,
}

impl<A: AuthApi, S: BlobStore> SessionStore<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self { api, storage }
    }

    /// A token is present
    pub fn is_authenticated(&self) -> bool {
        self.storage
            .get(TOKEN_KEY)
            .is_some_and(|token| !token.is_empty())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        read_json(&self.storage, USER_KEY)
    }

    pub async fn register(&self, user: NewUser) -> ApiResult<UserProfile> {
        let profile = self.api.register(&user).await?;
        log::info!("[Session] Registered {}", profile.email);
        Ok(profile)
    }

    pub async fn login(&self, credentials: Credentials) -> ApiResult<Option<UserProfile>> {
        let response = self.api.login(&credentials).await?;
        if let Err(e) = self.storage.set(TOKEN_KEY, &response.token) {
            log::error!("[Session] Could not persist token: {}", e);
        }
        match &response.data {
            Some(profile) => write_json(&self.storage, USER_KEY, profile),
            None => {
                remove_key(&self.storage, USER_KEY);
            }
        }
        log::info!("[Session] Signed in as {}", credentials.email);
        Ok(response.data)
    }

    /// Drop the stored credentials. Returns `false` if the token could not
    /// be removed, in which case the session is still active
    pub fn logout(&self) -> bool {
        let cleared = remove_key(&self.storage, TOKEN_KEY);
        remove_key(&self.storage, USER_KEY);
        if cleared {
            log::info!("[Session] Signed out");
        } else {
            log::warn!("[Session] Sign-out incomplete, token is still stored");
        }
        cleared
    }
}
