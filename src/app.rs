//! Todopy Frontend App
//!
//! Root component: builds the stores, provides them via context and
//! switches between the auth screens and the admin layout.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{Sidebar, SignIn, SignUp, StickyWall, TaskBoard};
use crate::context::{AppContext, View};
use crate::storage::AppStorage;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = match AppContext::new(store, AppStorage::detect()) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("[App] Could not start API client: {}", e);
            return view! {
                <p class="fatal-error">{format!("Failed to start: {}", e)}</p>
            }
            .into_any();
        }
    };
    provide_context(ctx);

    view! {
        {move || match ctx.view.get() {
            View::SignIn => view! { <SignIn /> }.into_any(),
            View::SignUp => view! { <SignUp /> }.into_any(),
            admin => view! {
                <div class="admin-layout">
                    <Sidebar />
                    <main class="main-content">
                        {match admin {
                            View::StickyWall => view! { <StickyWall /> }.into_any(),
                            _ => view! { <TaskBoard /> }.into_any(),
                        }}
                    </main>
                </div>
            }.into_any(),
        }}
    }
    .into_any()
}
