//! Sticky Wall Component
//!
//! Grid of sticky notes with a form to add new ones.

use leptos::prelude::*;

use crate::components::NoteCard;
use crate::composables::use_sticky_notes;
use crate::config::NOTE_COLORS;
use crate::models::NoteDraft;

#[component]
fn NewNoteForm() -> impl IntoView {
    let notes = use_sticky_notes();

    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (color, set_color) = signal(NOTE_COLORS[0].to_string());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_text = title.get().trim().to_string();
        if title_text.is_empty() {
            return;
        }
        notes.add(NoteDraft {
            title: title_text,
            content: content.get(),
            color: color.get(),
        });
        set_title.set(String::new());
        set_content.set(String::new());
    };

    view! {
        <form class="new-note-form" on:submit=submit>
            <input
                type="text"
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Write something..."
                prop:value=move || content.get()
                on:input=move |ev| set_content.set(event_target_value(&ev))
            ></textarea>
            <div class="color-picker">
                {NOTE_COLORS.iter().map(|&c| view! {
                    <button
                        type="button"
                        class=move || if color.get() == c { format!("swatch note-{} active", c) } else { format!("swatch note-{}", c) }
                        title=c
                        on:click=move |_| set_color.set(c.to_string())
                    ></button>
                }).collect_view()}
            </div>
            <button type="submit">"Add note"</button>
        </form>
    }
}

#[component]
pub fn StickyWall() -> impl IntoView {
    let notes = use_sticky_notes();

    Effect::new(move |_| notes.fetch());

    view! {
        <section class="sticky-wall">
            <h1>"Sticky Wall"</h1>
            {move || notes.error().map(|e| view! {
                <p class="offline-banner">"Working offline: " {e}</p>
            })}
            <div class="note-grid">
                <NewNoteForm />
                <For
                    each=move || notes.notes()
                    key=|note| (note.id, note.title.clone(), note.content.clone(), note.color.clone())
                    children=move |note| view! { <NoteCard note=note /> }
                />
            </div>
            <Show when=move || notes.loading()>
                <p class="loading">"Loading..."</p>
            </Show>
        </section>
    }
}
