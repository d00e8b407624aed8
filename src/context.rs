//! Application Context
//!
//! Store controllers and the current view, shared via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::api::{ApiClient, ApiResult};
use crate::config::ApiConfig;
use crate::storage::AppStorage;
use crate::store::{
    store_set_user, store_sync_notes, store_sync_tasks, AppStore, NoteStore, SessionStore,
    TaskStore,
};

pub type HttpClient = ApiClient<AppStorage>;
pub type AppTaskStore = TaskStore<HttpClient, AppStorage>;
pub type AppNoteStore = NoteStore<HttpClient, AppStorage>;
pub type AppSessionStore = SessionStore<HttpClient, AppStorage>;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SignIn,
    SignUp,
    Tasks,
    StickyWall,
}

impl View {
    pub fn requires_auth(self) -> bool {
        matches!(self, View::Tasks | View::StickyWall)
    }
}

/// Where a navigation to `target` actually lands: admin screens need a
/// session, auth screens are skipped once signed in
pub fn guard(target: View, signed_in: bool) -> View {
    match (target.requires_auth(), signed_in) {
        (true, false) => View::SignIn,
        (false, true) => View::Tasks,
        _ => target,
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub tasks: StoredValue<Rc<AppTaskStore>, LocalStorage>,
    pub notes: StoredValue<Rc<AppNoteStore>, LocalStorage>,
    pub session: StoredValue<Rc<AppSessionStore>, LocalStorage>,
    /// Current screen - read
    pub view: ReadSignal<View>,
    /// Current screen - write
    set_view: WriteSignal<View>,
}

impl AppContext {
    /// Build the controllers and wire them into the reactive store
    pub fn new(store: AppStore, storage: AppStorage) -> ApiResult<Self> {
        let client = ApiClient::new(ApiConfig::default(), storage.clone())?;
        log::info!("[App] Using API at {}", client.config().base_url);

        let tasks = Rc::new(TaskStore::new(client.clone(), storage.clone()));
        tasks.subscribe(move |state| store_sync_tasks(&store, state));

        let notes = Rc::new(NoteStore::new(client.clone(), storage.clone()));
        notes.subscribe(move |state| store_sync_notes(&store, state));

        let session = Rc::new(SessionStore::new(client, storage));
        let signed_in = session.is_authenticated();
        store_set_user(&store, session.current_user());

        let (view, set_view) = signal(guard(View::Tasks, signed_in));

        Ok(Self {
            tasks: StoredValue::new_local(tasks),
            notes: StoredValue::new_local(notes),
            session: StoredValue::new_local(session),
            view,
            set_view,
        })
    }

    /// Switch screens through the auth guard
    pub fn navigate(&self, target: View) {
        let signed_in = self.session.with_value(|s| s.is_authenticated());
        let landed = guard(target, signed_in);
        if landed != target {
            log::debug!("[App] Redirected {:?} -> {:?}", target, landed);
        }
        self.set_view.set(landed);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
