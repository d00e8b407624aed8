//! Store Integration Tests
//!
//! Stores run against an in-memory blob store and a scripted API that can
//! be switched offline. Every fake call yields once so concurrent actions
//! interleave the way they do on the browser event loop.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::api::{ApiError, ApiResult, AuthApi, NoteApi, TaskApi};
    use crate::config::{NOTES_KEY, TASKS_KEY, TASKS_STATE_KEY, TOKEN_KEY, USER_KEY};
    use crate::models::*;
    use crate::storage::{read_json, read_list, write_json, BlobStore, MemoryStore};
    use crate::store::{FetchParams, NoteStore, SessionStore, TaskStore};

    #[derive(Default)]
    struct Backend {
        tasks: RefCell<Vec<Task>>,
        notes: RefCell<Vec<StickyNote>>,
        offline: Cell<bool>,
        next_id: Cell<u64>,
        queries: RefCell<Vec<TaskQuery>>,
        updates: Cell<usize>,
    }

    #[derive(Clone, Default)]
    struct FakeApi(Rc<Backend>);

    impl FakeApi {
        fn with_tasks(titles: &[&str]) -> Self {
            let api = FakeApi::default();
            for title in titles {
                let id = api.next_id();
                api.0.tasks.borrow_mut().push(Task {
                    id: Some(id),
                    title: title.to_string(),
                    description: None,
                    completed: false,
                    due_date: None,
                    created_at: Some("2024-01-01T00:00:00.000Z".into()),
                    updated_at: Some("2024-01-01T00:00:00.000Z".into()),
                });
            }
            api
        }

        fn next_id(&self) -> u64 {
            let id = self.0.next_id.get() + 1;
            self.0.next_id.set(id);
            id
        }

        fn set_offline(&self, offline: bool) {
            self.0.offline.set(offline);
        }

        fn last_query(&self) -> TaskQuery {
            self.0.queries.borrow().last().cloned().expect("no query sent")
        }

        async fn call(&self) -> ApiResult<()> {
            tokio::task::yield_now().await;
            if self.0.offline.get() {
                Err(ApiError::Status {
                    status: 503,
                    body: "offline".into(),
                })
            } else {
                Ok(())
            }
        }

        fn not_found() -> ApiError {
            ApiError::Status {
                status: 404,
                body: "not found".into(),
            }
        }
    }

    #[async_trait(?Send)]
    impl TaskApi for FakeApi {
        async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<TaskPage> {
            self.0.queries.borrow_mut().push(query.clone());
            self.call().await?;
            let matching: Vec<Task> = self
                .0
                .tasks
                .borrow()
                .iter()
                .filter(|t| query.completed.map_or(true, |c| t.completed == c))
                .filter(|t| query.title.as_ref().map_or(true, |q| t.title.contains(q.as_str())))
                .cloned()
                .collect();
            let total = matching.len() as u64;
            let start = ((query.page - 1) * query.limit) as usize;
            let items = matching
                .into_iter()
                .skip(start)
                .take(query.limit as usize)
                .collect();
            Ok(TaskPage {
                items,
                meta: Some(PageMeta {
                    total_items: Some(total),
                    total_pages: Some(total.div_ceil(u64::from(query.limit))),
                    current_page: Some(query.page),
                    per_page: Some(query.limit),
                    remaining_count: None,
                }),
            })
        }

        async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
            self.call().await?;
            let task = draft.clone().into_task(self.next_id(), "2024-02-01T00:00:00.000Z");
            self.0.tasks.borrow_mut().insert(0, task.clone());
            Ok(task)
        }

        async fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task> {
            self.0.updates.set(self.0.updates.get() + 1);
            self.call().await?;
            let mut tasks = self.0.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == Some(id))
                .ok_or_else(Self::not_found)?;
            task.apply(patch);
            task.updated_at = Some("2024-03-01T00:00:00.000Z".into());
            Ok(task.clone())
        }

        async fn delete_task(&self, id: u64) -> ApiResult<()> {
            self.call().await?;
            self.0.tasks.borrow_mut().retain(|t| t.id != Some(id));
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl NoteApi for FakeApi {
        async fn list_notes(&self) -> ApiResult<Vec<StickyNote>> {
            self.call().await?;
            Ok(self.0.notes.borrow().clone())
        }

        async fn create_note(&self, draft: &NoteDraft) -> ApiResult<StickyNote> {
            self.call().await?;
            let note = draft
                .clone()
                .into_note(Some(self.next_id()), Some("2024-02-01T00:00:00.000Z".into()));
            self.0.notes.borrow_mut().insert(0, note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: u64, draft: &NoteDraft) -> ApiResult<StickyNote> {
            self.call().await?;
            let mut notes = self.0.notes.borrow_mut();
            let note = notes
                .iter_mut()
                .find(|n| n.id == Some(id))
                .ok_or_else(Self::not_found)?;
            *note = draft.clone().into_note(note.id, note.created_at.clone());
            Ok(note.clone())
        }

        async fn delete_note(&self, id: u64) -> ApiResult<()> {
            self.call().await?;
            self.0.notes.borrow_mut().retain(|n| n.id != Some(id));
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeApi {
        async fn register(&self, user: &NewUser) -> ApiResult<UserProfile> {
            self.call().await?;
            Ok(UserProfile {
                id: Some(self.next_id()),
                first_name: Some(user.first_name.clone()),
                last_name: Some(user.last_name.clone()),
                email: user.email.clone(),
            })
        }

        async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
            self.call().await?;
            if credentials.password != "secret" {
                return Err(ApiError::Status {
                    status: 401,
                    body: "Unauthorized".into(),
                });
            }
            Ok(AuthResponse {
                token: "jwt-token".into(),
                data: Some(UserProfile {
                    id: Some(1),
                    first_name: Some("Ada".into()),
                    last_name: None,
                    email: credentials.email.clone(),
                }),
            })
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn setup(titles: &[&str]) -> (FakeApi, MemoryStore, TaskStore<FakeApi, MemoryStore>) {
        let api = FakeApi::with_tasks(titles);
        let storage = MemoryStore::new();
        let store = TaskStore::new(api.clone(), storage.clone());
        (api, storage, store)
    }

    // ========================
    // Tasks
    // ========================

    #[tokio::test]
    async fn test_fetch_populates_list_and_mirror() {
        let (_api, storage, store) = setup(&["a", "b", "c"]);

        store.fetch_tasks(FetchParams::default()).await;

        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["a", "b", "c"]);
        assert_eq!(state.pagination.total, 3);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(read_list::<Task>(&storage, TASKS_KEY).len(), 3);
    }

    #[tokio::test]
    async fn test_create_then_list_reflects_new_record() {
        let (_api, _storage, store) = setup(&["existing"]);
        store.fetch_tasks(FetchParams::default()).await;

        let created = store.add_task(TaskDraft::new("fresh")).await;

        assert!(created.id.is_some());
        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["fresh", "existing"]);
        assert_eq!(state.pagination.total, 2);

        store.fetch_tasks(FetchParams::default()).await;
        assert!(store.snapshot().tasks.iter().any(|t| t.id == created.id));
    }

    #[tokio::test]
    async fn test_add_on_later_page_prepends_and_truncates() {
        let (_api, _storage, store) = setup(&["1", "2", "3", "4"]);
        store.set_limit(2).await;
        store.set_page(2).await;
        assert_eq!(titles(&store.snapshot().tasks), vec!["3", "4"]);

        store.add_task(TaskDraft::new("new")).await;

        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["new", "3"]);
        assert_eq!(state.pagination.page, 2);
        assert_eq!(state.pagination.total, 5);
    }

    #[tokio::test]
    async fn test_add_offline_synthesizes_local_task() {
        let (api, storage, store) = setup(&[]);
        api.set_offline(true);

        let task = store.add_task(TaskDraft::new("offline")).await;

        assert!(task.id.is_some());
        assert!(task.created_at.is_some());
        assert_eq!(task.created_at, task.updated_at);
        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["offline"]);
        assert!(state.error.is_some());
        assert!(!state.loading);
        let mirror: Vec<Task> = read_list(&storage, TASKS_KEY);
        assert_eq!(mirror, vec![task]);
    }

    #[tokio::test]
    async fn test_offline_fetch_serves_cached_records() {
        let (api, _storage, store) = setup(&["cached one", "cached two"]);
        store.fetch_tasks(FetchParams::default()).await;

        api.set_offline(true);
        store.fetch_tasks(FetchParams::default()).await;

        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["cached one", "cached two"]);
        assert_eq!(state.pagination.total, 2);
        assert!(state.error.is_some());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_offline_fetch_applies_filter_to_mirror() {
        let (api, _storage, store) = setup(&["milk", "bread", "oat milk"]);
        store.fetch_tasks(FetchParams::default()).await;
        store.toggle_task(1).await;

        api.set_offline(true);
        store.search("MILK".into()).await;
        assert_eq!(titles(&store.snapshot().tasks), vec!["milk", "oat milk"]);

        store.filter_by_completed(Some(false)).await;
        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["oat milk"]);
        assert_eq!(state.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_toggle_is_idempotent_while_in_flight() {
        let (api, storage, store) = setup(&["a"]);
        store.fetch_tasks(FetchParams::default()).await;

        tokio::join!(store.toggle_task(1), store.toggle_task(1));

        assert_eq!(api.0.updates.get(), 1);
        let state = store.snapshot();
        assert!(state.tasks[0].completed);
        assert!(state.toggling.is_empty());
        let mirror: Vec<Task> = read_list(&storage, TASKS_KEY);
        assert!(mirror[0].completed);
    }

    #[tokio::test]
    async fn test_toggle_is_optimistic_and_marks_in_flight() {
        let (_api, _storage, store) = setup(&["a"]);
        store.fetch_tasks(FetchParams::default()).await;
        let before = store.snapshot().tasks[0].updated_at.clone();

        let seen: Rc<RefCell<Vec<(bool, bool)>>> = Rc::default();
        let log = seen.clone();
        store.subscribe(move |s| {
            if let Some(t) = s.tasks.first() {
                log.borrow_mut().push((t.completed, s.toggling.contains(&1)));
            }
        });

        store.toggle_task(1).await;

        let seen = seen.borrow();
        assert!(seen.contains(&(true, true)), "optimistic state never published");
        assert_eq!(seen.last(), Some(&(true, false)));
        assert_ne!(store.snapshot().tasks[0].updated_at, before);
    }

    #[tokio::test]
    async fn test_toggle_failure_keeps_local_change() {
        let (api, _storage, store) = setup(&["a"]);
        store.fetch_tasks(FetchParams::default()).await;
        api.set_offline(true);

        store.toggle_task(1).await;

        let state = store.snapshot();
        assert!(state.tasks[0].completed);
        assert!(state.toggling.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_noop() {
        let (api, _storage, store) = setup(&["a"]);
        store.fetch_tasks(FetchParams::default()).await;

        store.toggle_task(42).await;

        assert_eq!(api.0.updates.get(), 0);
    }

    #[tokio::test]
    async fn test_search_and_filter_reset_to_first_page() {
        let (api, storage, store) = setup(&["a1", "a2", "a3", "b1"]);
        store.set_limit(1).await;
        store.set_page(3).await;
        assert_eq!(store.snapshot().pagination.page, 3);

        store.search("a".into()).await;
        let state = store.snapshot();
        assert_eq!(state.pagination.page, 1);
        assert_eq!(api.last_query().page, 1);
        assert_eq!(api.last_query().title.as_deref(), Some("a"));

        store.set_page(2).await;
        store.filter_by_completed(Some(false)).await;
        assert_eq!(store.snapshot().pagination.page, 1);
        assert_eq!(api.last_query().completed, Some(false));

        let persisted: PersistedTaskState = read_json(&storage, TASKS_STATE_KEY).unwrap();
        assert_eq!(persisted.pagination.page, 1);
        assert_eq!(persisted.pagination.limit, 1);
        assert_eq!(persisted.search_query, "a");
        assert_eq!(persisted.filter_completed, Some(false));
    }

    #[tokio::test]
    async fn test_set_limit_resets_page_and_total_pages() {
        let (_api, _storage, store) = setup(&["1", "2", "3", "4", "5"]);
        store.set_page(1).await;
        assert_eq!(store.total_pages(), 1);

        store.set_limit(2).await;
        let state = store.snapshot();
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.limit, 2);
        assert_eq!(store.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_state_is_restored_from_storage() {
        let storage = MemoryStore::new();
        write_json(
            &storage,
            TASKS_STATE_KEY,
            &PersistedTaskState {
                pagination: PersistedPagination { page: 3, limit: 20 },
                search_query: "report".into(),
                filter_completed: Some(true),
            },
        );

        let store = TaskStore::new(FakeApi::default(), storage);
        let state = store.snapshot();
        assert_eq!(state.pagination.page, 3);
        assert_eq!(state.pagination.limit, 20);
        assert_eq!(state.filter.search, "report");
        assert_eq!(state.filter.completed, Some(true));
    }

    #[tokio::test]
    async fn test_malformed_state_falls_back_to_defaults() {
        let storage = MemoryStore::new();
        storage.set(TASKS_STATE_KEY, "oops").unwrap();

        let store = TaskStore::new(FakeApi::default(), storage);
        let state = store.snapshot();
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.limit, 10);
        assert!(state.filter.search.is_empty());
    }

    #[tokio::test]
    async fn test_edit_replaces_record() {
        let (_api, storage, store) = setup(&["draft"]);
        store.fetch_tasks(FetchParams::default()).await;

        let edited = store
            .edit_task(
                1,
                TaskPatch {
                    title: Some("final".into()),
                    description: Some(Some("details".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.title, "final");
        assert_eq!(store.snapshot().tasks[0], edited);
        let mirror: Vec<Task> = read_list(&storage, TASKS_KEY);
        assert_eq!(mirror[0], edited);
    }

    #[tokio::test]
    async fn test_edit_offline_merges_locally() {
        let (api, _storage, store) = setup(&["draft"]);
        store.fetch_tasks(FetchParams::default()).await;
        let original = store.snapshot().tasks[0].clone();
        api.set_offline(true);

        let edited = store
            .edit_task(
                1,
                TaskPatch {
                    due_date: Some(Some("2024-12-31".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.title, "draft");
        assert_eq!(edited.created_at, original.created_at);
        assert_ne!(edited.updated_at, original.updated_at);
        assert_eq!(edited.due_date.as_deref(), Some("2024-12-31"));
        assert!(store.edit_task(99, TaskPatch::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_last_item_steps_back_a_page() {
        let (_api, storage, store) = setup(&["1", "2", "3"]);
        store.set_limit(2).await;
        store.set_page(2).await;
        assert_eq!(titles(&store.snapshot().tasks), vec!["3"]);

        store.remove_task(3).await;

        let state = store.snapshot();
        assert_eq!(state.pagination.page, 1);
        assert_eq!(titles(&state.tasks), vec!["1", "2"]);
        assert_eq!(state.pagination.total, 2);
        assert!(!state.loading);
        let mirror: Vec<Task> = read_list(&storage, TASKS_KEY);
        assert!(mirror.iter().all(|t| t.id != Some(3)));
    }

    #[tokio::test]
    async fn test_remove_offline_still_removes_locally() {
        let (api, storage, store) = setup(&["1", "2"]);
        store.fetch_tasks(FetchParams::default()).await;
        api.set_offline(true);

        store.remove_task(1).await;

        let state = store.snapshot();
        assert_eq!(titles(&state.tasks), vec!["2"]);
        assert_eq!(state.pagination.total, 1);
        assert!(state.error.is_some());
        assert_eq!(read_list::<Task>(&storage, TASKS_KEY).len(), 1);
    }

    // ========================
    // Notes
    // ========================

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: "body".into(),
            color: "yellow".into(),
        }
    }

    #[tokio::test]
    async fn test_notes_round_trip_and_offline_fallback() {
        let api = FakeApi::default();
        let storage = MemoryStore::new();
        let store = NoteStore::new(api.clone(), storage.clone());

        store.add_note(draft("first")).await;
        store.add_note(draft("second")).await;
        store.fetch_notes().await;
        assert_eq!(store.snapshot().notes.len(), 2);

        api.set_offline(true);
        let fresh = NoteStore::new(api.clone(), storage.clone());
        fresh.fetch_notes().await;
        let state = fresh.snapshot();
        assert_eq!(state.notes[0].title, "second");
        assert_eq!(state.notes.len(), 2);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_note_offline_edit_keeps_identity() {
        let api = FakeApi::default();
        let storage = MemoryStore::new();
        let store = NoteStore::new(api.clone(), storage.clone());
        let note = store.add_note(draft("first")).await;

        api.set_offline(true);
        let id = note.id.unwrap();
        let edited = store.edit_note(id, draft("renamed")).await.unwrap();

        assert_eq!(edited.id, note.id);
        assert_eq!(edited.created_at, note.created_at);
        assert_eq!(edited.title, "renamed");
        assert!(store.edit_note(id + 100, draft("missing")).await.is_none());

        let mirror: Vec<StickyNote> = read_list(&storage, NOTES_KEY);
        assert_eq!(mirror, vec![edited]);
    }

    #[tokio::test]
    async fn test_note_offline_add_and_remove() {
        let api = FakeApi::default();
        api.set_offline(true);
        let storage = MemoryStore::new();
        let store = NoteStore::new(api, storage.clone());

        let a = store.add_note(draft("a")).await;
        let b = store.add_note(draft("b")).await;
        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());

        store.remove_note(a.id.unwrap()).await;
        assert_eq!(store.snapshot().notes, vec![b.clone()]);
        assert_eq!(read_list::<StickyNote>(&storage, NOTES_KEY), vec![b]);
    }

    // ========================
    // Session
    // ========================

    #[tokio::test]
    async fn test_login_persists_token_and_logout_clears_it() {
        let storage = MemoryStore::new();
        let session = SessionStore::new(FakeApi::default(), storage.clone());
        assert!(!session.is_authenticated());

        let user = session
            .login(Credentials {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.unwrap().email, "ada@example.com");
        assert!(session.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("jwt-token"));
        assert_eq!(session.current_user().unwrap().display_name(), "Ada");

        assert!(session.logout());
        assert!(!session.is_authenticated());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_surfaced() {
        let storage = MemoryStore::new();
        let session = SessionStore::new(FakeApi::default(), storage.clone());

        let err = session
            .login(Credentials {
                email: "ada@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!session.is_authenticated());
    }
}
