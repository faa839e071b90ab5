//! Tag Bar Component
//!
//! Board tags with inline add, edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_app_context;
use crate::models::Tag;
use crate::store::{use_app_store, AppStateStoreFields};

const DEFAULT_TAG_COLOR: &str = "#4a90d9";

#[component]
pub fn TagBar(board_id: u32) -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (color, set_color) = signal(DEFAULT_TAG_COLOR.to_string());

    let add_tag = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = name.get_untracked().trim().to_string();
        if title.is_empty() {
            return;
        }
        set_name.set(String::new());
        spawn_local(commands::create_tag(app, store, board_id, title, color.get_untracked()));
    };

    view! {
        <div class="tag-bar">
            {move || {
                store
                    .tags()
                    .get()
                    .into_iter()
                    .map(|tag| view! { <TagChip tag=tag /> })
                    .collect_view()
            }}
            <form class="tag-add-form" on:submit=add_tag>
                <input
                    type="color"
                    prop:value=move || color.get()
                    on:input=move |ev| set_color.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Add tag..."
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </div>
    }
}

/// A tag; clicking it edits title and colour in place
#[component]
fn TagChip(tag: Tag) -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let tag_id = tag.id;
    let (editing, set_editing) = signal(false);
    let (title, set_title) = signal(tag.title.clone());
    let (color, set_color) = signal(tag.color.clone());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_editing.set(false);
        spawn_local(commands::update_tag(app, store, tag_id, title.get_untracked(), color.get_untracked()));
    };
    let delete = Callback::new(move |_| {
        spawn_local(commands::delete_tag(app, store, tag_id));
    });
    let label = tag.title.clone();

    view! {
        <span class="tag-chip" style=format!("--tag-color: {};", tag.color)>
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <button type="button" class="tag-label" on:click=move |_| set_editing.set(true)>
                            {label.clone()}
                        </button>
                    }
                }
            >
                <form class="tag-edit-form" on:submit=save>
                    <input
                        type="color"
                        prop:value=move || color.get()
                        on:input=move |ev| set_color.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <button type="submit">"✓"</button>
                    <button type="button" on:click=move |_| set_editing.set(false)>"✗"</button>
                </form>
            </Show>
            <DeleteConfirmButton button_class="tag-delete-btn" on_confirm=delete />
        </span>
    }
}
