//! Sidebar Component
//!
//! Navigation between the admin screens plus sign-out.

use leptos::prelude::*;

use crate::composables::use_session;
use crate::context::{use_app_context, View};

const MENU: &[(View, &str)] = &[(View::Tasks, "Tasks"), (View::StickyWall, "Sticky Wall")];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();

    let user_name = move || {
        session
            .user()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "Signed in".to_string())
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-user">{user_name}</div>
            <nav class="sidebar-menu">
                {MENU.iter().map(|&(target, label)| {
                    let is_active = move || ctx.view.get() == target;
                    view! {
                        <button
                            class=move || if is_active() { "menu-item active" } else { "menu-item" }
                            on:click=move |_| ctx.navigate(target)
                        >
                            {label}
                        </button>
                    }
                }).collect_view()}
            </nav>
            <button class="sign-out-btn" on:click=move |_| session.logout()>"Sign out"</button>
        </aside>
    }
}
