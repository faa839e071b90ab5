//! Context Menu Component
//!
//! Secondary-button menu for an item. Closes on Escape or on any primary
//! press outside it.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::{use_app_context, ContextMenuState};
use crate::store::{item_tag_list, use_app_store, AppStateStoreFields};

const MENU_ID: &str = "item-context-menu";

fn inside_menu(ev: &web_sys::PointerEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(&format!("#{MENU_ID}")).ok().flatten())
        .is_some()
}

#[component]
pub fn ContextMenu() -> impl IntoView {
    let app = use_app_context();

    let press = window_event_listener(ev::pointerdown, move |ev| {
        // The opening press is secondary; leave it alone
        if ev.buttons() & 2 != 0 || inside_menu(&ev) {
            return;
        }
        app.close_context_menu();
    });
    let key = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            app.close_context_menu();
        }
    });
    on_cleanup(move || {
        press.remove();
        key.remove();
    });

    move || app.context_menu.get().map(|menu| view! { <ContextMenuBody menu=menu /> })
}

#[component]
fn ContextMenuBody(menu: ContextMenuState) -> impl IntoView {
    let app = use_app_context();
    let store = use_app_store();
    let item_id = menu.item_id;

    let delete = Callback::new(move |_| {
        app.close_context_menu();
        spawn_local(commands::delete_item(app, store, item_id));
    });

    view! {
        <div
            id=MENU_ID
            class="context-menu"
            role="menu"
            style=format!("left: {}px; top: {}px;", menu.at.x, menu.at.y)
            on:contextmenu=|ev| ev.prevent_default()
        >
            <button
                type="button"
                role="menuitem"
                on:click=move |_| {
                    app.close_context_menu();
                    spawn_local(commands::set_item_archived(app, store, item_id, true));
                }
            >
                "Archive"
            </button>
            <DeleteConfirmButton button_class="menu-delete" label="Delete" on_confirm=delete />
            <div class="context-menu-tags">
                {move || {
                    let assigned: Vec<u32> = item_tag_list(&store, item_id).iter().map(|t| t.id).collect();
                    store
                        .tags()
                        .get()
                        .into_iter()
                        .map(|tag| {
                            let tag_id = tag.id;
                            let on = assigned.contains(&tag_id);
                            view! {
                                <button
                                    type="button"
                                    role="menuitemcheckbox"
                                    aria-checked=on.to_string()
                                    class=if on { "tag-chip active" } else { "tag-chip" }
                                    style=format!("--tag-color: {};", tag.color)
                                    on:click=move |_| {
                                        spawn_local(commands::set_item_tag(app, store, item_id, tag_id, !on));
                                    }
                                >
                                    {tag.title.clone()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
