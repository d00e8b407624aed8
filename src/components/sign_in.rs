//! Sign-in Form Component

use leptos::prelude::*;

use crate::composables::use_session;
use crate::context::{use_app_context, View};
use crate::models::Credentials;

#[component]
pub fn SignIn() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            set_error.set(Some("Email and password are required".into()));
            return;
        }
        set_error.set(None);
        set_pending.set(true);
        session.login(credentials, move |message| {
            set_pending.set(false);
            set_error.set(Some(message));
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=submit>
                <h1>"Sign in"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="auth-switch">
                    "No account? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(View::SignUp);
                    }>"Sign up"</a>
                </p>
            </form>
        </div>
    }
}
