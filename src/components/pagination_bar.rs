//! Pagination Bar Component

use leptos::prelude::*;

use crate::composables::use_tasks;
use crate::config::PAGE_SIZE_CHOICES;

#[component]
pub fn PaginationBar() -> impl IntoView {
    let tasks = use_tasks();

    let page = move || tasks.pagination().page;
    let total_pages = move || tasks.total_pages();

    view! {
        <div class="pagination-bar">
            <button
                disabled=move || page() <= 1
                on:click=move |_| tasks.set_page(page() - 1)
            >
                "‹"
            </button>
            <span class="page-indicator">
                {move || format!("{} / {}", page(), total_pages())}
            </span>
            <button
                disabled=move || page() >= total_pages()
                on:click=move |_| tasks.set_page(page() + 1)
            >
                "›"
            </button>
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
                        tasks.set_limit(limit);
                    }
                }
            >
                {PAGE_SIZE_CHOICES.iter().map(|&size| view! {
                    <option value=size.to_string() selected=move || tasks.pagination().limit == size>
                        {format!("{} / page", size)}
                    </option>
                }).collect_view()}
            </select>
            <span class="task-total">{move || format!("{} tasks", tasks.pagination().total)}</span>
        </div>
    }
}
