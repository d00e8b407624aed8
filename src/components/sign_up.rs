//! Sign-up Form Component

use leptos::prelude::*;

use crate::composables::use_session;
use crate::context::{use_app_context, View};
use crate::models::NewUser;

/// Labelled text input bound to a signal
#[component]
fn Field(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="auth-field">
            <span>{label}</span>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn SignUp() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = NewUser {
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if user.email.is_empty() || user.password.is_empty() || user.first_name.is_empty() {
            set_error.set(Some("Name, email and password are required".into()));
            return;
        }
        set_error.set(None);
        session.register(user, move |message| set_error.set(Some(message)));
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=submit>
                <h1>"Create account"</h1>
                <Field label="First name" value=first_name />
                <Field label="Last name" value=last_name />
                <Field label="Email" input_type="email" value=email />
                <Field label="Password" input_type="password" value=password />
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <button type="submit">"Sign up"</button>
                <p class="auth-switch">
                    "Already registered? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(View::SignIn);
                    }>"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
