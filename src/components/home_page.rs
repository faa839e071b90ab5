//! Home Page Component
//!
//! Board list with create, rename, archive and delete, the archived boards,
//! plus JSON export and import.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{DeleteConfirmButton, NewEntryForm};
use crate::commands;
use crate::context::use_app_context;
use crate::models::Board;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn HomePage() -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let (dump, set_dump) = signal(String::new());
    let (show_archived, set_show_archived) = signal(false);

    let add_board = Callback::new(move |title: String| {
        spawn_local(commands::create_board(app, store, title));
    });

    let export = move |_| {
        spawn_local(async move {
            if let Some(json) = commands::export_data(app).await {
                set_dump.set(json);
            }
        });
    };

    let import = move |_| {
        let json = dump.get_untracked();
        if json.trim().is_empty() {
            return;
        }
        spawn_local(commands::import_data(app, store, json));
    };

    view! {
        <div class="home-page">
            <h1>"Boards"</h1>
            <ul class="board-list">
                {move || {
                    store
                        .boards()
                        .get()
                        .into_iter()
                        .map(|board| view! { <BoardCard board=board /> })
                        .collect_view()
                }}
            </ul>
            <NewEntryForm placeholder="Board title" button_label="+ Add Board" on_submit=add_board />

            <button
                type="button"
                class=move || if show_archived.get() { "archive-toggle active" } else { "archive-toggle" }
                on:click=move |_| set_show_archived.update(|v| *v = !*v)
            >
                "Archived boards"
            </button>
            <Show when=move || show_archived.get()>
                <ArchivedBoards />
            </Show>

            <details class="data-transfer">
                <summary>"Import / export"</summary>
                <textarea
                    rows="8"
                    prop:value=move || dump.get()
                    on:input=move |ev| set_dump.set(event_target_value(&ev))
                ></textarea>
                <div class="dialog-actions">
                    <button type="button" on:click=export>"Export"</button>
                    <button type="button" on:click=import>"Import"</button>
                </div>
            </details>
        </div>
    }
}

/// One active board: open, rename in place, archive, delete
#[component]
fn BoardCard(board: Board) -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let id = board.id;
    let (renaming, set_renaming) = signal(false);
    let (draft, set_draft) = signal(board.title.clone());

    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_renaming.set(false);
        spawn_local(commands::rename_board(app, store, id, draft.get_untracked()));
    };
    let delete = Callback::new(move |_| {
        spawn_local(commands::delete_board(app, store, id));
    });
    let title = board.title.clone();

    view! {
        <li class="board-card">
            <Show
                when=move || renaming.get()
                fallback=move || {
                    view! {
                        <button
                            type="button"
                            class="board-open"
                            on:click=move |_| spawn_local(commands::open_board(app, store, id))
                        >
                            {title.clone()}
                        </button>
                    }
                }
            >
                <form class="rename-form" on:submit=rename>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| set_renaming.set(false)>"Cancel"</button>
                </form>
            </Show>
            <span class="muted">{board.created.format("%Y-%m-%d").to_string()}</span>
            <button type="button" on:click=move |_| set_renaming.set(true)>"Rename"</button>
            <button
                type="button"
                class="archive-btn"
                on:click=move |_| {
                    spawn_local(commands::set_board_archived(app, store, id, true));
                }
            >
                "Archive"
            </button>
            <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
        </li>
    }
}

/// Archived boards with restore and delete
#[component]
fn ArchivedBoards() -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let (boards, set_boards) = signal(Vec::<Board>::new());

    // Refetch whenever the active boards change
    Effect::new(move |_| {
        store.boards().track();
        spawn_local(async move {
            set_boards.set(commands::load_archived_boards(app).await);
        });
    });

    view! {
        <section class="archived-boards">
            <Show when=move || boards.with(|b| !b.is_empty()) fallback=|| view! { <p class="muted">"None"</p> }>
                <ul>
                    {move || {
                        boards
                            .get()
                            .into_iter()
                            .map(|board| {
                                let id = board.id;
                                let delete = Callback::new(move |_| {
                                    spawn_local(async move {
                                        commands::delete_board(app, store, id).await;
                                        set_boards.update(|bs| bs.retain(|b| b.id != id));
                                    });
                                });
                                view! {
                                    <li>
                                        <span>{board.title}</span>
                                        <button
                                            type="button"
                                            on:click=move |_| {
                                                spawn_local(commands::set_board_archived(app, store, id, false));
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
        </section>
    }
}
