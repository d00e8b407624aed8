//! Session bindings
//!
//! Auth forms get the API error back so they can show it inline.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiError;
use crate::context::{use_app_context, AppContext, View};
use crate::models::{Credentials, NewUser, UserProfile};
use crate::store::{store_set_user, use_app_store, AppStateStoreFields, AppStore};

#[derive(Clone, Copy)]
pub struct UseSession {
    store: AppStore,
    ctx: AppContext,
}

pub fn use_session() -> UseSession {
    UseSession {
        store: use_app_store(),
        ctx: use_app_context(),
    }
}

/// User-facing message for a failed auth request
fn auth_error_message(err: &ApiError) -> String {
    if err.is_unauthorized() {
        "Invalid email or password".to_string()
    } else {
        err.to_string()
    }
}

impl UseSession {
    pub fn user(&self) -> Option<UserProfile> {
        self.store.user().get()
    }

    pub fn login(&self, credentials: Credentials, on_error: impl FnOnce(String) + 'static) {
        let this = *self;
        let session: Rc<_> = self.ctx.session.get_value();
        spawn_local(async move {
            match session.login(credentials).await {
                Ok(user) => {
                    store_set_user(&this.store, user);
                    this.ctx.navigate(View::Tasks);
                }
                Err(e) => {
                    log::warn!("[Session] Sign-in failed: {}", e);
                    on_error(auth_error_message(&e));
                }
            }
        });
    }

    /// Register, then continue to the sign-in screen
    pub fn register(&self, user: NewUser, on_error: impl FnOnce(String) + 'static) {
        let ctx = self.ctx;
        let session = self.ctx.session.get_value();
        spawn_local(async move {
            match session.register(user).await {
                Ok(_) => ctx.navigate(View::SignIn),
                Err(e) => {
                    log::warn!("[Session] Sign-up failed: {}", e);
                    on_error(e.to_string());
                }
            }
        });
    }

    pub fn logout(&self) {
        if self.ctx.session.with_value(|s| s.logout()) {
            store_set_user(&self.store, None);
        }
        self.ctx.navigate(View::SignIn);
    }
}
