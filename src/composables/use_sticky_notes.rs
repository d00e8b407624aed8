//! Sticky wall bindings

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppNoteStore};
use crate::models::{NoteDraft, StickyNote};
use crate::store::{use_app_store, AppStateStoreFields, AppStore};

#[derive(Clone, Copy)]
pub struct UseStickyNotes {
    store: AppStore,
    controller: StoredValue<Rc<AppNoteStore>, LocalStorage>,
}

pub fn use_sticky_notes() -> UseStickyNotes {
    UseStickyNotes {
        store: use_app_store(),
        controller: use_app_context().notes,
    }
}

impl UseStickyNotes {
    pub fn notes(&self) -> Vec<StickyNote> {
        self.store.notes().get()
    }

    pub fn loading(&self) -> bool {
        self.store.notes_loading().get()
    }

    pub fn error(&self) -> Option<String> {
        self.store.notes_error().get()
    }

    pub fn fetch(&self) {
        let s = self.controller.get_value();
        spawn_local(async move { s.fetch_notes().await });
    }

    pub fn add(&self, draft: NoteDraft) {
        let s = self.controller.get_value();
        spawn_local(async move {
            s.add_note(draft).await;
        });
    }

    pub fn edit(&self, id: u64, draft: NoteDraft) {
        let s = self.controller.get_value();
        spawn_local(async move {
            s.edit_note(id, draft).await;
        });
    }

    pub fn remove(&self, id: u64) {
        let s = self.controller.get_value();
        spawn_local(async move { s.remove_note(id).await });
    }
}
