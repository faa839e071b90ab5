//! List Column Component
//!
//! A draggable list with its items. The items area is a drop area for
//! item drags; the column itself sits in the board's list drop area.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::render::gap_style;
use leptos_reorder::{use_interaction, Axis, EntityKind, EntityRef};

use super::press::{key_press, pointer_press};
use super::{ItemCard, NewEntryForm};
use crate::commands;
use crate::context::use_app_context;
use crate::models::List;
use crate::store::{ordered_items, use_app_store, AppStateStoreFields};

#[component]
pub fn ListColumn(list: List, rank: usize) -> impl IntoView {
    let interaction = use_interaction();
    let app = use_app_context();
    let store = use_app_store();

    let list_id = list.id;
    let board_id = list.board_id;
    let entity = EntityRef {
        kind: EntityKind::List,
        id: list_id,
        container: board_id,
        index: rank,
        order: list.order,
    };
    let title = list.title.clone();

    let count = move || {
        store
            .items()
            .with(|items| items.iter().filter(|i| i.list_id == list_id && !i.archived).count())
    };
    let column_style = move || {
        if interaction.gap_before(EntityKind::List, board_id, rank) {
            gap_style(interaction.session().as_ref(), Axis::Horizontal)
        } else {
            String::new()
        }
    };
    let header_class = move || {
        if interaction.is_selected(EntityKind::List, list_id) {
            "list-header selected"
        } else {
            "list-header"
        }
    };
    let items_class = move || {
        interaction
            .container_state(EntityKind::Item, list_id, count())
            .class_name("list-items")
    };
    let trailing_style = move || {
        if interaction.trailing_gap(EntityKind::Item, list_id, count()) {
            gap_style(interaction.session().as_ref(), Axis::Vertical)
        } else {
            "display: none;".to_string()
        }
    };

    let add_item = Callback::new(move |title: String| {
        spawn_local(commands::create_item(app, store, list_id, title));
    });

    view! {
        <Show when=move || !interaction.is_dragged(EntityKind::List, list_id)>
            <section class="list-column" style=column_style data-drag-index=rank>
                <header
                    class=header_class
                    tabindex="0"
                    data-drag-kind="list"
                    data-id=list_id
                    on:pointerdown=move |ev| pointer_press(interaction, app, &ev, entity)
                    on:keydown=move |ev| key_press(interaction, &ev, entity)
                    on:contextmenu=|ev| ev.prevent_default()
                >
                    <h3>{title.clone()}</h3>
                    <span class="list-count">{count}</span>
                </header>
                <div class=items_class data-drop-area="item" data-container=list_id>
                    {move || {
                        ordered_items(&store, list_id)
                            .into_iter()
                            .enumerate()
                            .map(|(rank, item)| view! { <ItemCard item=item rank=rank /> })
                            .collect_view()
                    }}
                    <div class="drop-gap" style=trailing_style></div>
                </div>
                <NewEntryForm placeholder="Item title" button_label="+ Add Item" on_submit=add_item />
            </section>
        </Show>
    }
}
