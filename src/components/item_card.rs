//! Item Card Component
//!
//! One draggable card in a list. Hidden while it is being dragged; the
//! ghost stands in for it.

use leptos::prelude::*;
use leptos_reorder::render::gap_style;
use leptos_reorder::{use_interaction, Axis, EntityKind, EntityRef};

use super::press::{key_press, pointer_press};
use crate::context::use_app_context;
use crate::models::Item;
use crate::store::{item_tag_list, use_app_store};

#[component]
pub fn ItemCard(item: Item, rank: usize) -> impl IntoView {
    let interaction = use_interaction();
    let app = use_app_context();

    let id = item.id;
    let list_id = item.list_id;
    let entity = EntityRef {
        kind: EntityKind::Item,
        id,
        container: list_id,
        index: rank,
        order: item.order,
    };

    let class = move || {
        if interaction.is_selected(EntityKind::Item, id) {
            "item-card selected"
        } else {
            "item-card"
        }
    };
    let style = move || {
        if interaction.gap_before(EntityKind::Item, list_id, rank) {
            gap_style(interaction.session().as_ref(), Axis::Vertical)
        } else {
            String::new()
        }
    };

    view! {
        <Show when=move || !interaction.is_dragged(EntityKind::Item, id)>
            <button
                type="button"
                class=class
                style=style
                data-drag-kind="item"
                data-id=id
                data-drag-index=rank
                on:pointerdown=move |ev| pointer_press(interaction, app, &ev, entity)
                on:keydown=move |ev| key_press(interaction, &ev, entity)
                on:contextmenu=|ev| ev.prevent_default()
            >
                <ItemCardBody item=item.clone() />
            </button>
        </Show>
    }
}

/// Banner, title and tag chips; shared by the card and its drag ghost
#[component]
pub fn ItemCardBody(item: Item) -> impl IntoView {
    let store = use_app_store();
    let id = item.id;
    let title = if item.title.is_empty() { "Untitled".to_string() } else { item.title };

    view! {
        {item.banner.map(|src| view! { <img class="item-banner" src=src draggable="false" alt="" /> })}
        <span class="item-title">{title}</span>
        <span class="item-tags">
            {move || {
                item_tag_list(&store, id)
                    .into_iter()
                    .map(|tag| {
                        view! {
                            <span
                                class="item-tag"
                                title=tag.title.clone()
                                style=format!("background-color: {};", tag.color)
                            ></span>
                        }
                    })
                    .collect_view()
            }}
        </span>
    }
}
