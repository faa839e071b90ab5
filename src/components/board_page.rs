//! Board Page Component
//!
//! Horizontal row of lists for the open board, plus the dialogs and
//! overlays that act on it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::render::gap_style;
use leptos_reorder::{use_interaction, Axis, EntityKind};

use super::{ArchivedPanel, ContextMenu, DragGhost, ItemEditor, ListColumn, ListEditor, NewEntryForm, TagBar};
use crate::commands;
use crate::context::use_app_context;
use crate::store::{ordered_lists, store_close_board, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardPage(board_id: u32) -> impl IntoView {
    let interaction = use_interaction();
    let app = use_app_context();
    let store = use_app_store();
    let (show_archived, set_show_archived) = signal(false);

    let title = move || {
        store
            .boards()
            .with(|boards| boards.iter().find(|b| b.id == board_id).map(|b| b.title.clone()))
            .unwrap_or_default()
    };
    let count = move || {
        store
            .lists()
            .with(|lists| lists.iter().filter(|l| l.board_id == board_id && !l.archived).count())
    };
    let lists_class = move || {
        interaction
            .container_state(EntityKind::List, board_id, count())
            .class_name("lists-row")
    };
    let trailing_style = move || {
        if interaction.trailing_gap(EntityKind::List, board_id, count()) {
            gap_style(interaction.session().as_ref(), Axis::Horizontal)
        } else {
            "display: none;".to_string()
        }
    };

    let add_list = Callback::new(move |title: String| {
        spawn_local(commands::create_list(app, store, board_id, title));
    });

    view! {
        <div class="board-page">
            <header class="board-header">
                <button type="button" class="back-btn" on:click=move |_| store_close_board(&store)>
                    "← Boards"
                </button>
                <h2>{title}</h2>
                <TagBar board_id=board_id />
                <button
                    type="button"
                    class=move || if show_archived.get() { "archive-toggle active" } else { "archive-toggle" }
                    on:click=move |_| set_show_archived.update(|v| *v = !*v)
                >
                    "Archived"
                </button>
            </header>

            <div class=lists_class data-drop-area="list" data-container=board_id>
                {move || {
                    ordered_lists(&store)
                        .into_iter()
                        .enumerate()
                        .map(|(rank, list)| view! { <ListColumn list=list rank=rank /> })
                        .collect_view()
                }}
                <div class="drop-gap" style=trailing_style></div>
                <NewEntryForm
                    class="add-list"
                    placeholder="List title"
                    button_label="+ Add List"
                    on_submit=add_list
                />
            </div>

            <Show when=move || show_archived.get()>
                <ArchivedPanel board_id=board_id />
            </Show>

            <DragGhost />
            <ItemEditor />
            <ListEditor />
            <ContextMenu />
        </div>
    }
}
