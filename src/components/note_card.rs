//! Note Card Component
//!
//! One sticky note, editable in place.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::composables::use_sticky_notes;
use crate::models::{NoteDraft, StickyNote};

#[component]
pub fn NoteCard(note: StickyNote) -> impl IntoView {
    let notes = use_sticky_notes();
    let id = note.id;
    let color = note.color.clone();

    let (editing, set_editing) = signal(false);
    let title = RwSignal::new(note.title.clone());
    let content = RwSignal::new(note.content.clone());

    let save = move |_| {
        set_editing.set(false);
        if let Some(id) = id {
            notes.edit(
                id,
                NoteDraft {
                    title: title.get(),
                    content: content.get(),
                    color: color.clone(),
                },
            );
        }
    };

    view! {
        <div class=format!("sticky-note note-{}", note.color)>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="note-view" on:dblclick=move |_| set_editing.set(true)>
                        <h3>{move || title.get()}</h3>
                        <p>{move || content.get()}</p>
                    </div>
                }
            >
                <div class="note-edit">
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    ></textarea>
                    <button on:click=save.clone()>"Save"</button>
                </div>
            </Show>
            {id.map(|id| view! {
                <DeleteConfirmButton
                    button_class="note-delete-btn"
                    on_confirm=Callback::new(move |_| notes.remove(id))
                />
            })}
        </div>
    }
}
