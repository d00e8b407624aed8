//! Application State Stores
//!
//! Plain controllers (`TaskStore`, `NoteStore`, `SessionStore`) own the
//! data-sync logic and notify listeners on every change. The global
//! `AppState` below mirrors their state into Leptos reactive_stores for
//! fine-grained reactivity.

mod notes;
mod session;
mod tasks;

#[cfg(test)]
mod tests;

use std::cell::RefCell;

use chrono::{SecondsFormat, Utc};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Pagination, StickyNote, Task, TaskFilter, UserProfile};

pub use notes::{NoteState, NoteStore};
pub use session::SessionStore;
pub use tasks::{FetchParams, TaskState, TaskStore};

// ========================
// Listeners
// ========================

/// Callbacks run after each state change
pub struct Listeners<T> {
    inner: RefCell<Vec<Box<dyn Fn(&T)>>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            inner: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Listeners<T> {
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().push(Box::new(listener));
    }

    pub fn notify(&self, state: &T) {
        for listener in self.inner.borrow().iter() {
            listener(state);
        }
    }
}

// ========================
// Clock
// ========================

/// ISO-8601 timestamp as the API writes it
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

// ========================
// Reactive Store
// ========================

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current page of tasks
    pub tasks: Vec<Task>,
    pub pagination: Pagination,
    pub filter: TaskFilter,
    pub tasks_loading: bool,
    pub tasks_error: Option<String>,
    /// Task ids with a toggle request in flight
    pub toggling: Vec<u64>,
    pub notes: Vec<StickyNote>,
    pub notes_loading: bool,
    pub notes_error: Option<String>,
    /// Signed-in user profile, if the API returned one
    pub user: Option<UserProfile>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy task controller state into the reactive store
pub fn store_sync_tasks(store: &AppStore, state: &TaskState) {
    *store.tasks().write() = state.tasks.clone();
    *store.pagination().write() = state.pagination;
    *store.filter().write() = state.filter.clone();
    *store.tasks_loading().write() = state.loading;
    *store.tasks_error().write() = state.error.clone();

    let mut toggling: Vec<u64> = state.toggling.iter().copied().collect();
    toggling.sort_unstable();
    *store.toggling().write() = toggling;
}

/// Copy note controller state into the reactive store
pub fn store_sync_notes(store: &AppStore, state: &NoteState) {
    *store.notes().write() = state.notes.clone();
    *store.notes_loading().write() = state.loading;
    *store.notes_error().write() = state.error.clone();
}

/// Record the signed-in user (`None` after sign-out)
pub fn store_set_user(store: &AppStore, user: Option<UserProfile>) {
    *store.user().write() = user;
}
