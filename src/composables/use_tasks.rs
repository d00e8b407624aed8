//! Task list bindings

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppTaskStore};
use crate::models::{Pagination, Task, TaskDraft, TaskFilter, TaskPatch};
use crate::store::{use_app_store, AppStateStoreFields, AppStore, FetchParams};

/// Reactive task state plus bound actions
#[derive(Clone, Copy)]
pub struct UseTasks {
    store: AppStore,
    controller: StoredValue<Rc<AppTaskStore>, LocalStorage>,
}

pub fn use_tasks() -> UseTasks {
    UseTasks {
        store: use_app_store(),
        controller: use_app_context().tasks,
    }
}

impl UseTasks {
    pub fn tasks(&self) -> Vec<Task> {
        self.store.tasks().get()
    }

    pub fn loading(&self) -> bool {
        self.store.tasks_loading().get()
    }

    pub fn error(&self) -> Option<String> {
        self.store.tasks_error().get()
    }

    pub fn pagination(&self) -> Pagination {
        self.store.pagination().get()
    }

    pub fn filter(&self) -> TaskFilter {
        self.store.filter().get()
    }

    /// Current search text, without subscribing
    pub fn search_untracked(&self) -> String {
        self.store.filter().get_untracked().search
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination().total_pages()
    }

    pub fn is_toggling(&self, id: u64) -> bool {
        self.store.toggling().get().contains(&id)
    }

    fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<AppTaskStore>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let controller = self.controller.get_value();
        spawn_local(action(controller));
    }

    // ========================
    // Actions
    // ========================

    pub fn fetch(&self) {
        self.spawn(|s| async move { s.fetch_tasks(FetchParams::default()).await });
    }

    /// Create a task, then run `on_done` with the stored record
    pub fn add(&self, draft: TaskDraft, on_done: impl FnOnce(Task) + 'static) {
        self.spawn(|s| async move {
            let task = s.add_task(draft).await;
            on_done(task);
        });
    }

    pub fn edit(&self, id: u64, patch: TaskPatch) {
        self.spawn(move |s| async move {
            s.edit_task(id, patch).await;
        });
    }

    pub fn remove(&self, id: u64) {
        self.spawn(move |s| async move { s.remove_task(id).await });
    }

    pub fn toggle(&self, id: u64) {
        self.spawn(move |s| async move { s.toggle_task(id).await });
    }

    pub fn set_page(&self, page: u32) {
        self.spawn(move |s| async move { s.set_page(page).await });
    }

    pub fn set_limit(&self, limit: u32) {
        self.spawn(move |s| async move { s.set_limit(limit).await });
    }

    pub fn search(&self, query: String) {
        self.spawn(|s| async move { s.search(query).await });
    }

    pub fn filter_by_completed(&self, completed: Option<bool>) {
        self.spawn(move |s| async move { s.filter_by_completed(completed).await });
    }
}
