//! Sticky Note Store
//!
//! The notes endpoint is unpaginated, so a successful fetch replaces the
//! mirror wholesale.

use std::cell::RefCell;

use super::{now_iso, now_millis, Listeners};
use crate::api::NoteApi;
use crate::cache;
use crate::config::NOTES_KEY;
use crate::models::{NoteDraft, StickyNote};
use crate::storage::{read_list, write_json, BlobStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteState {
    pub notes: Vec<StickyNote>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct NoteStore<A, S> {
    api: A,
    storage: S,
    state: RefCell<NoteState>,
    listeners: Listeners<NoteState>,
}

impl<A: NoteApi, S: BlobStore> NoteStore<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            storage,
            state: RefCell::new(NoteState::default()),
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&NoteState) + 'static) {
        listener(&self.state.borrow());
        self.listeners.subscribe(listener);
    }

    pub fn snapshot(&self) -> NoteState {
        self.state.borrow().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut NoteState) -> R) -> R {
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

    /// Mutate the in-memory list and persist it as the mirror
    fn commit<R>(&self, error: Option<String>, f: impl FnOnce(&mut Vec<StickyNote>) -> R) -> R {
        self.update(|s| {
            let out = f(&mut s.notes);
            write_json(&self.storage, NOTES_KEY, &s.notes);
            s.error = error;
            s.loading = false;
            out
        })
    }

    pub async fn fetch_notes(&self) {
        self.begin();
        match self.api.list_notes().await {
            Ok(notes) => {
                log::debug!("[NoteStore] Loaded {} notes", notes.len());
                self.commit(None, |list| *list = notes);
            }
            Err(e) => {
                log::warn!("[NoteStore] API failed, using local mirror: {}", e);
                let mirror: Vec<StickyNote> = read_list(&self.storage, NOTES_KEY);
                self.update(|s| {
                    s.notes = mirror;
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Create a note; synthesized locally when the API is unreachable
    pub async fn add_note(&self, draft: NoteDraft) -> StickyNote {
        self.begin();
        match self.api.create_note(&draft).await {
            Ok(note) => {
                self.commit(None, |list| cache::prepend(list, note.clone()));
                note
            }
            Err(e) => {
                log::warn!("[NoteStore] API failed, creating note locally: {}", e);
                self.commit(Some(e.to_string()), |list| {
                    let id = cache::local_id(list, now_millis());
                    let note = draft.into_note(Some(id), Some(now_iso()));
                    cache::prepend(list, note.clone());
                    note
                })
            }
        }
    }

    /// Replace a note's fields; the local fallback keeps its id and creation time
    pub async fn edit_note(&self, id: u64, draft: NoteDraft) -> Option<StickyNote> {
        self.begin();
        match self.api.update_note(id, &draft).await {
            Ok(note) => {
                self.commit(None, |list| cache::replace(list, note.clone()));
                Some(note)
            }
            Err(e) => {
                log::warn!("[NoteStore] API failed, editing note locally: {}", e);
                self.commit(Some(e.to_string()), |list| {
                    let existing = list.iter_mut().find(|n| n.id == Some(id))?;
                    let note = draft.into_note(existing.id, existing.created_at.clone());
                    *existing = note.clone();
                    Some(note)
                })
            }
        }
    }

    /// Delete a note; removed locally whether or not the API call succeeds
    pub async fn remove_note(&self, id: u64) {
        self.begin();
        let error = match self.api.delete_note(id).await {
            Ok(()) => None,
            Err(e) => {
                log::warn!("[NoteStore] API failed, removing note locally: {}", e);
                Some(e.to_string())
            }
        };
        self.commit(error, |list| cache::remove(list, id));
    }
}
