//! Debounced callbacks

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::use_tasks;
use crate::config::SEARCH_DEBOUNCE_MS;

/// Delay `action` until `delay_ms` have passed without another call.
/// Replacing the pending `Timeout` drops it, which cancels the timer.
pub fn use_debounce<T: 'static>(
    delay_ms: u32,
    action: impl Fn(T) + Clone + Send + Sync + 'static,
) -> Callback<T> {
    let pending = StoredValue::new_local(None::<Timeout>);
    Callback::new(move |value: T| {
        let action = action.clone();
        let timeout = Timeout::new(delay_ms, move || action(value));
        pending.set_value(Some(timeout));
    })
}

/// Search callback for the task toolbar
pub fn use_debounced_search() -> Callback<String> {
    let tasks = use_tasks();
    use_debounce(SEARCH_DEBOUNCE_MS, move |query: String| tasks.search(query))
}
