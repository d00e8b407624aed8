//! Task Item Component
//!
//! A single task row with completion toggle, inline title edit and delete.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::composables::use_tasks;
use crate::models::{Task, TaskPatch};

#[component]
pub fn TaskItem(task: Task) -> impl IntoView {
    let tasks = use_tasks();

    // Unsaved records have nothing to address on the server
    let Some(id) = task.id else {
        return view! { <li class="task-row pending">{task.title}</li> }.into_any();
    };
    let completed = task.completed;
    let (editing, set_editing) = signal(false);
    let (draft_title, set_draft_title) = signal(task.title.clone());

    // Submit hides the input, which fires blur; only the first save counts
    let save_title = move || {
        let patch = title_patch(editing.get_untracked(), &draft_title.get_untracked());
        set_editing.set(false);
        if let Some(patch) = patch {
            tasks.edit(id, patch);
        }
    };

    let title = task.title.clone();
    let description = task.description.clone();
    let due_date = task.due_date.clone();

    view! {
        <li class=if completed { "task-row completed" } else { "task-row" }>
            <input
                type="checkbox"
                checked=completed
                disabled=move || tasks.is_toggling(id)
                on:change=move |_| tasks.toggle(id)
            />
            <div class="task-body">
                <Show
                    when=move || editing.get()
                    fallback={
                        let title = title.clone();
                        move || view! {
                            <span class="task-title" on:dblclick=move |_| set_editing.set(true)>
                                {title.clone()}
                            </span>
                        }
                    }
                >
                    <form class="task-edit-form" on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        save_title();
                    }>
                        <input
                            type="text"
                            prop:value=move || draft_title.get()
                            on:input=move |ev| set_draft_title.set(event_target_value(&ev))
                            on:blur=move |_| save_title()
                        />
                    </form>
                </Show>
                {description.map(|d| view! { <p class="task-description">{d}</p> })}
            </div>
            {due_date.map(|d| view! { <span class="task-due">{d}</span> })}
            <DeleteConfirmButton
                button_class="delete-btn"
                on_confirm=Callback::new(move |_| tasks.remove(id))
            />
        </li>
    }
    .into_any()
}

/// Patch for a finished title edit, or `None` when no edit is open or the
/// title was cleared
fn title_patch(editing: bool, draft: &str) -> Option<TaskPatch> {
    let title = draft.trim();
    if !editing || title.is_empty() {
        return None;
    }
    Some(TaskPatch {
        title: Some(title.to_string()),
        ..Default::default()
    })
}
