//! View-binding Composables
//!
//! Thin adapters exposing store state and actions to components.

mod debounce;
mod use_session;
mod use_sticky_notes;
mod use_tasks;

pub use debounce::{use_debounce, use_debounced_search};
pub use use_session::{use_session, UseSession};
pub use use_sticky_notes::{use_sticky_notes, UseStickyNotes};
pub use use_tasks::{use_tasks, UseTasks};
