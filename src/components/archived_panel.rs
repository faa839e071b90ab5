//! Archived Panel Component
//!
//! Archived lists and items of the open board, with restore and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_app_context;
use crate::models::{Item, List};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ArchivedPanel(board_id: u32) -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let (lists, set_lists) = signal(Vec::<List>::new());
    let (items, set_items) = signal(Vec::<Item>::new());

    // Refetch whenever the board's active contents change
    Effect::new(move |_| {
        store.lists().track();
        store.items().track();
        spawn_local(async move {
            let (archived_lists, archived_items) = commands::load_archived(app, board_id).await;
            set_lists.set(archived_lists);
            set_items.set(archived_items);
        });
    });

    let list_title = move |list_id: u32| {
        lists
            .with(|ls| ls.iter().find(|l| l.id == list_id).map(|l| l.title.clone()))
            .or_else(|| store.lists().with(|ls| ls.iter().find(|l| l.id == list_id).map(|l| l.title.clone())))
            .unwrap_or_default()
    };

    view! {
        <aside class="archived-panel">
            <h3>"Archived lists"</h3>
            <Show when=move || lists.with(|l| !l.is_empty()) fallback=|| view! { <p class="muted">"None"</p> }>
                <ul>
                    {move || {
                        lists
                            .get()
                            .into_iter()
                            .map(|list| {
                                let id = list.id;
                                let delete = Callback::new(move |_| {
                                    spawn_local(async move {
                                        if commands::delete_list(app, id).await {
                                            set_lists.update(|ls| ls.retain(|l| l.id != id));
                                            set_items.update(|is| is.retain(|i| i.list_id != id));
                                        }
                                    });
                                });
                                view! {
                                    <li>
                                        <span>{list.title}</span>
                                        <button
                                            type="button"
                                            on:click=move |_| {
                                                spawn_local(commands::set_list_archived(app, store, id, false));
                                            }
                                        >
                                            "Restore"
                                        </button>
                                        <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>

            <h3>"Archived items"</h3>
            <Show when=move || items.with(|i| !i.is_empty()) fallback=|| view! { <p class="muted">"None"</p> }>
                <ul>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|item| {
                                let id = item.id;
                                let delete = Callback::new(move |_| {
                                    spawn_local(async move {
                                        commands::delete_item(app, store, id).await;
                                        set_items.update(|is| is.retain(|i| i.id != id));
                                    });
                                });
                                view! {
                                    <li>
                                        <span>{item.title}</span>
                                        <span class="muted">{format!(" in {}", list_title(item.list_id))}</span>
                                        <button
                                            type="button"
                                            on:click=move |_| {
                                                spawn_local(commands::set_item_archived(app, store, id, false));
                                            }
                                        >
                                            "Restore"
                                        </button>
                                        <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </aside>
    }
}
