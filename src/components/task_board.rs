//! Task Board Component
//!
//! Toolbar (search and completion filter), new-task form, the current page
//! of tasks and the pagination bar.

use leptos::prelude::*;

use crate::components::{PaginationBar, TaskForm, TaskItem};
use crate::composables::{use_debounced_search, use_tasks};

/// Completion filter options: (select value, label, filter)
const FILTERS: &[(&str, &str, Option<bool>)] = &[
    ("all", "All", None),
    ("open", "Open", Some(false)),
    ("done", "Completed", Some(true)),
];

#[component]
fn TaskToolbar() -> impl IntoView {
    let tasks = use_tasks();
    let search = use_debounced_search();
    let initial_query = tasks.search_untracked();

    view! {
        <div class="task-toolbar">
            <input
                type="search"
                class="task-search"
                placeholder="Search tasks..."
                value=initial_query
                on:input=move |ev| search.run(event_target_value(&ev))
            />
            <select
                class="task-filter"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if let Some(&(_, _, completed)) = FILTERS.iter().find(|(v, _, _)| *v == value) {
                        tasks.filter_by_completed(completed);
                    }
                }
            >
                {FILTERS.iter().map(|&(value, label, completed)| view! {
                    <option value=value selected=move || tasks.filter().completed == completed>
                        {label}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn TaskBoard() -> impl IntoView {
    let tasks = use_tasks();

    // Load on mount
    Effect::new(move |_| tasks.fetch());

    view! {
        <section class="task-board">
            <h1>"Tasks"</h1>
            <TaskToolbar />
            <TaskForm />
            {move || tasks.error().map(|e| view! {
                <p class="offline-banner">"Working offline: " {e}</p>
            })}
            <Show when=move || tasks.loading()>
                <p class="loading">"Loading..."</p>
            </Show>
            <ul class="task-list">
                <For
                    each=move || tasks.tasks()
                    key=|task| (task.id, task.completed, task.updated_at.clone(), task.title.clone())
                    children=move |task| view! { <TaskItem task=task /> }
                />
            </ul>
            <Show when=move || !tasks.loading() && tasks.tasks().is_empty()>
                <p class="empty">"No tasks"</p>
            </Show>
            <PaginationBar />
        </section>
    }
}
