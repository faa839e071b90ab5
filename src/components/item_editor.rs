//! Item Editor Component
//!
//! Details dialog opened by tapping an item or pressing Enter on it.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::{use_interaction, EntityKind};

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_app_context;
use crate::models::{Item, ItemPatch};
use crate::store::{item_tag_list, use_app_store, AppStateStoreFields};

#[component]
pub fn ItemEditor() -> impl IntoView {
    let interaction = use_interaction();
    let store = use_app_store();

    let editing = Memo::new(move |_| {
        interaction
            .session()
            .filter(|s| s.dialog_open && s.kind == EntityKind::Item)
            .map(|s| s.id)
    });

    move || {
        let id = editing.get()?;
        let item = store.items().with_untracked(|items| items.iter().find(|i| i.id == id).cloned())?;
        Some(view! { <ItemEditorDialog item=item /> })
    }
}

#[component]
fn ItemEditorDialog(item: Item) -> impl IntoView {
    let interaction = use_interaction();
    let app = use_app_context();
    let store = use_app_store();

    let id = item.id;
    let (title, set_title) = signal(item.title.clone());
    let (content, set_content) = signal(item.content.clone());
    let (banner, set_banner) = signal(item.banner.clone().unwrap_or_default());
    let saved_tags: Vec<u32> = item_tag_list(&store, id).iter().map(|t| t.id).collect();
    let (tag_ids, set_tag_ids) = signal(saved_tags.clone());

    let close = move || {
        interaction.close_details();
    };

    // Move focus into the dialog once it is mounted
    let title_input = NodeRef::<html::Input>::new();
    Effect::new(move |_| {
        if let Some(input) = title_input.get() {
            let _ = input.focus();
        }
    });

    let save = move |_| {
        let selected = tag_ids.get_untracked();
        let add: Vec<u32> = selected.iter().copied().filter(|t| !saved_tags.contains(t)).collect();
        let remove: Vec<u32> = saved_tags.iter().copied().filter(|t| !selected.contains(t)).collect();
        let banner = banner.get_untracked().trim().to_string();
        let patch = ItemPatch {
            title: Some(title.get_untracked()),
            content: Some(content.get_untracked()),
            banner: Some((!banner.is_empty()).then_some(banner)),
        };
        spawn_local(commands::save_item(app, store, id, patch, add, remove));
        close();
    };

    let archive = move |_| {
        spawn_local(commands::set_item_archived(app, store, id, true));
        close();
    };

    let delete = Callback::new(move |_| {
        spawn_local(commands::delete_item(app, store, id));
        close();
    });

    let toggle_tag = move |tag_id: u32| {
        set_tag_ids.update(|ids| match ids.iter().position(|t| *t == tag_id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(tag_id),
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| close()>
            <div
                class="dialog item-editor"
                role="dialog"
                aria-modal="true"
                on:click=|ev| ev.stop_propagation()
            >
                <label>
                    "Title"
                    <input
                        type="text"
                        node_ref=title_input
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Content"
                    <textarea
                        prop:value=move || content.get()
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Banner image URL"
                    <input
                        type="url"
                        prop:value=move || banner.get()
                        on:input=move |ev| set_banner.set(event_target_value(&ev))
                    />
                </label>

                <div class="tag-picker">
                    {move || {
                        store
                            .tags()
                            .get()
                            .into_iter()
                            .map(|tag| {
                                let tag_id = tag.id;
                                let on = move || tag_ids.with(|ids| ids.contains(&tag_id));
                                view! {
                                    <button
                                        type="button"
                                        class=move || if on() { "tag-chip active" } else { "tag-chip" }
                                        style=format!("--tag-color: {};", tag.color)
                                        on:click=move |_| toggle_tag(tag_id)
                                    >
                                        {tag.title.clone()}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <div class="dialog-actions">
                    <button type="button" class="archive-btn" on:click=archive>"Archive"</button>
                    <DeleteConfirmButton button_class="delete-btn" label="Delete" on_confirm=delete />
                    <span class="spacer"></span>
                    <button type="button" on:click=move |_| close()>"Cancel"</button>
                    <button type="button" class="primary" on:click=save>"Save"</button>
                </div>
            </div>
        </div>
    }
}
