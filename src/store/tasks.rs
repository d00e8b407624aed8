//! Task Store
//!
//! Paginated, filtered task list backed by the remote API with the local
//! mirror as offline fallback.

use std::cell::RefCell;
use std::collections::HashSet;

use super::{now_iso, now_millis, Listeners};
use crate::api::TaskApi;
use crate::cache;
use crate::config::{DEFAULT_PAGE_SIZE, TASKS_KEY, TASKS_STATE_KEY};
use crate::models::{
    Pagination, PersistedPagination, PersistedTaskState, Task, TaskDraft, TaskFilter, TaskPatch,
    TaskQuery,
};
use crate::storage::{read_json, read_list, write_json, BlobStore};

/// Overrides for a single fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub filter: TaskFilter,
    /// Ids whose completion toggle has not resolved yet
    pub toggling: HashSet<u64>,
}

pub struct TaskStore<A, S> {
    api: A,
    storage: S,
    state: RefCell<TaskState>,
    listeners: Listeners<TaskState>,
}

impl<A: TaskApi, S: BlobStore> TaskStore<A, S> {
    /// Create the store, restoring pagination and filters from storage
    pub fn new(api: A, storage: S) -> Self {
        let restored: PersistedTaskState = read_json(&storage, TASKS_STATE_KEY).unwrap_or_default();
        let limit = match restored.pagination.limit {
            0 => DEFAULT_PAGE_SIZE,
            limit => limit,
        };
        let state = TaskState {
            pagination: Pagination {
                page: restored.pagination.page.max(1),
                limit,
                total: 0,
            },
            filter: TaskFilter {
                completed: restored.filter_completed,
                search: restored.search_query,
            },
            ..Default::default()
        };
        Self {
            api,
            storage,
            state: RefCell::new(state),
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&TaskState) + 'static) {
        listener(&self.state.borrow());
        self.listeners.subscribe(listener);
    }

    pub fn snapshot(&self) -> TaskState {
        self.state.borrow().clone()
    }

    pub fn total_pages(&self) -> u32 {
        self.state.borrow().pagination.total_pages()
    }

    fn update<R>(&self, f: impl FnOnce(&mut TaskState) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        self.listeners.notify(&self.state.borrow());
        out
    }

    fn begin(&self) {
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, message: String) {
        self.update(|s| {
            s.error = Some(message);
            s.loading = false;
        });
    }

    // ========================
    // Mirror
    // ========================

    fn load_mirror(&self) -> Vec<Task> {
        read_list(&self.storage, TASKS_KEY)
    }

    fn with_mirror<R>(&self, f: impl FnOnce(&mut Vec<Task>) -> R) -> R {
        let mut mirror = self.load_mirror();
        let out = f(&mut mirror);
        write_json(&self.storage, TASKS_KEY, &mirror);
        out
    }

    fn save_state(&self) {
        let persisted = {
            let s = self.state.borrow();
            PersistedTaskState {
                pagination: PersistedPagination {
                    page: s.pagination.page,
                    limit: s.pagination.limit,
                },
                search_query: s.filter.search.clone(),
                filter_completed: s.filter.completed,
            }
        };
        write_json(&self.storage, TASKS_STATE_KEY, &persisted);
    }

    // ========================
    // Actions
    // ========================

    /// Load the current page; serves the mirror when the API is unreachable
    pub async fn fetch_tasks(&self, params: FetchParams) {
        let query = self.update(|s| {
            s.loading = true;
            s.error = None;
            TaskQuery {
                page: params.page.unwrap_or(s.pagination.page),
                limit: params.limit.unwrap_or(s.pagination.limit),
                completed: s.filter.completed,
                title: (!s.filter.search.is_empty()).then(|| s.filter.search.clone()),
            }
        });

        match self.api.list_tasks(&query).await {
            Ok(page) => {
                let meta = page.meta.unwrap_or_default();
                if !page.items.is_empty() {
                    let mirror = cache::reconcile(self.load_mirror(), &page.items);
                    write_json(&self.storage, TASKS_KEY, &mirror);
                }
                log::debug!("[TaskStore] Loaded {} tasks (page {})", page.items.len(), query.page);
                self.update(|s| {
                    s.tasks = page.items;
                    s.pagination.total = meta.total_items.unwrap_or(0);
                    s.pagination.page = params
                        .page
                        .or(meta.current_page)
                        .unwrap_or(s.pagination.page);
                    s.pagination.limit = meta
                        .per_page
                        .filter(|&limit| limit > 0)
                        .unwrap_or(query.limit);
                    s.loading = false;
                });
            }
            Err(e) => {
                log::warn!("[TaskStore] API failed, using local mirror: {}", e);
                let mirror = self.load_mirror();
                self.update(|s| {
                    s.pagination.page = query.page.max(1);
                    s.pagination.limit = query.limit.max(1);
                    let (tasks, total) = cache::query_tasks(&mirror, &s.filter, &s.pagination);
                    s.tasks = tasks;
                    s.pagination.total = total;
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Create a task; synthesized locally when the API is unreachable
    pub async fn add_task(&self, draft: TaskDraft) -> Task {
        self.begin();
        match self.api.create_task(&draft).await {
            Ok(task) => {
                self.with_mirror(|m| cache::prepend(m, task.clone()));
                let first_page = self.state.borrow().pagination.page == 1;
                if first_page {
                    self.fetch_tasks(FetchParams::default()).await;
                } else {
                    self.update(|s| {
                        Self::push_front(s, task.clone());
                        s.loading = false;
                    });
                }
                task
            }
            Err(e) => {
                log::warn!("[TaskStore] API failed, creating task locally: {}", e);
                let task = self.with_mirror(|m| {
                    let id = cache::local_id(m, now_millis());
                    let task = draft.into_task(id, &now_iso());
                    cache::prepend(m, task.clone());
                    task
                });
                self.update(|s| {
                    Self::push_front(s, task.clone());
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
                task
            }
        }
    }

    fn push_front(s: &mut TaskState, task: Task) {
        cache::prepend(&mut s.tasks, task);
        s.tasks.truncate(s.pagination.limit.max(1) as usize);
        s.pagination.total += 1;
    }

    /// Apply a partial update; returns `None` for an unknown id
    pub async fn edit_task(&self, id: u64, patch: TaskPatch) -> Option<Task> {
        self.begin();
        match self.api.update_task(id, &patch).await {
            Ok(task) => {
                self.with_mirror(|m| cache::upsert(m, task.clone()));
                self.update(|s| {
                    cache::replace(&mut s.tasks, task.clone());
                    s.loading = false;
                });
                Some(task)
            }
            Err(e) => {
                log::warn!("[TaskStore] API failed, editing task locally: {}", e);
                let existing = self
                    .state
                    .borrow()
                    .tasks
                    .iter()
                    .find(|t| t.id == Some(id))
                    .cloned()
                    .or_else(|| self.load_mirror().into_iter().find(|t| t.id == Some(id)));
                let Some(mut task) = existing else {
                    self.fail(e.to_string());
                    return None;
                };
                task.apply(&patch);
                task.updated_at = Some(now_iso());
                self.with_mirror(|m| cache::upsert(m, task.clone()));
                self.update(|s| {
                    cache::replace(&mut s.tasks, task.clone());
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
                Some(task)
            }
        }
    }

    /// Delete a task; removed locally even when the API call fails
    pub async fn remove_task(&self, id: u64) {
        self.begin();
        let result = self.api.delete_task(id).await;
        self.with_mirror(|m| cache::remove(m, id));

        match result {
            Ok(()) => {
                let step_back = self.update(|s| {
                    if cache::remove(&mut s.tasks, id) {
                        s.pagination.total = s.pagination.total.saturating_sub(1);
                    }
                    let step_back = s.tasks.is_empty() && s.pagination.page > 1;
                    if step_back {
                        s.pagination.page -= 1;
                    } else {
                        s.loading = false;
                    }
                    step_back
                });
                if step_back {
                    self.fetch_tasks(FetchParams::default()).await;
                }
            }
            Err(e) => {
                log::warn!("[TaskStore] API failed, removing task locally: {}", e);
                self.update(|s| {
                    if cache::remove(&mut s.tasks, id) {
                        s.pagination.total = s.pagination.total.saturating_sub(1);
                    }
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Flip completion optimistically; ignored while a toggle for the same
    /// id is in flight. A failed request keeps the optimistic state.
    pub async fn toggle_task(&self, id: u64) {
        let optimistic = {
            let mut guard = self.state.borrow_mut();
            let s = &mut *guard;
            if s.toggling.contains(&id) {
                return;
            }
            let Some(task) = s.tasks.iter_mut().find(|t| t.id == Some(id)) else {
                return;
            };
            task.completed = !task.completed;
            task.updated_at = Some(now_iso());
            s.toggling.insert(id);
            task.clone()
        };
        self.listeners.notify(&self.state.borrow());
        self.with_mirror(|m| cache::upsert(m, optimistic.clone()));

        match self
            .api
            .update_task(id, &TaskPatch::completed(optimistic.completed))
            .await
        {
            Ok(task) => {
                self.with_mirror(|m| cache::upsert(m, task.clone()));
                self.update(|s| {
                    cache::replace(&mut s.tasks, task);
                    s.toggling.remove(&id);
                });
            }
            Err(e) => {
                log::warn!("[TaskStore] API update failed, keeping local change: {}", e);
                self.update(|s| {
                    s.toggling.remove(&id);
                });
            }
        }
    }

    // ========================
    // Pagination & Filters
    // ========================

    pub async fn set_page(&self, page: u32) {
        let page = page.max(1);
        self.update(|s| s.pagination.page = page);
        self.save_state();
        self.fetch_tasks(FetchParams {
            page: Some(page),
            ..Default::default()
        })
        .await;
    }

    pub async fn set_limit(&self, limit: u32) {
        let limit = limit.max(1);
        self.update(|s| {
            s.pagination.limit = limit;
            s.pagination.page = 1;
        });
        self.save_state();
        self.fetch_tasks(FetchParams {
            limit: Some(limit),
            ..Default::default()
        })
        .await;
    }

    pub async fn search(&self, query: String) {
        self.update(|s| {
            s.filter.search = query;
            s.pagination.page = 1;
        });
        self.save_state();
        self.fetch_tasks(FetchParams::default()).await;
    }

    pub async fn filter_by_completed(&self, completed: Option<bool>) {
        self.update(|s| {
            s.filter.completed = completed;
            s.pagination.page = 1;
        });
        self.save_state();
        self.fetch_tasks(FetchParams::default()).await;
    }
}
