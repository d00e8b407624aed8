//! Task Form Component
//!
//! Form for creating new tasks.

use leptos::prelude::*;

use crate::composables::use_tasks;
use crate::models::TaskDraft;

/// Empty input becomes `None`
fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[component]
pub fn TaskForm() -> impl IntoView {
    let tasks = use_tasks();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(title_text) = non_empty(title.get()) else { return };
        let draft = TaskDraft {
            title: title_text,
            description: non_empty(description.get()),
            completed: false,
            due_date: non_empty(due_date.get()),
        };
        tasks.add(draft, move |task| {
            log::debug!("[TaskForm] Added task {:?}", task.id);
            set_title.set(String::new());
            set_description.set(String::new());
            set_due_date.set(String::new());
        });
    };

    view! {
        <form class="task-form" on:submit=submit>
            <input
                type="text"
                class="task-title-input"
                placeholder="Add new task..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="task-description-input"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input
                type="date"
                prop:value=move || due_date.get()
                on:input=move |ev| set_due_date.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || tasks.loading()>"Add"</button>
        </form>
    }
}
