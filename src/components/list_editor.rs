//! List Editor Component

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::{use_interaction, EntityKind};

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_app_context;
use crate::store::{store_remove_list, use_app_store, AppStateStoreFields};

/// Details dialog for a list: archive or delete it
#[component]
pub fn ListEditor() -> impl IntoView {
    let interaction = use_interaction();
    let app = use_app_context();
    let store = use_app_store();

    let editing = Memo::new(move |_| {
        interaction
            .session()
            .filter(|s| s.dialog_open && s.kind == EntityKind::List)
            .map(|s| s.id)
    });

    move || {
        let id = editing.get()?;
        let list = store.lists().with_untracked(|lists| lists.iter().find(|l| l.id == id).cloned())?;
        let item_count = store
            .items()
            .with_untracked(|items| items.iter().filter(|i| i.list_id == id && !i.archived).count());
        let close = move || {
            interaction.close_details();
        };
        let close_button = NodeRef::<html::Button>::new();
        Effect::new(move |_| {
            if let Some(button) = close_button.get() {
                let _ = button.focus();
            }
        });
        let delete = Callback::new(move |_| {
            spawn_local(async move {
                if commands::delete_list(app, id).await {
                    store_remove_list(&store, id);
                }
            });
            close();
        });

        Some(view! {
            <div class="dialog-backdrop" on:click=move |_| close()>
                <div
                    class="dialog list-editor"
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev| ev.stop_propagation()
                >
                    <h3>{list.title.clone()}</h3>
                    <p class="muted">{format!("{item_count} items")}</p>
                    <div class="dialog-actions">
                        <button
                            type="button"
                            class="archive-btn"
                            on:click=move |_| {
                                spawn_local(commands::set_list_archived(app, store, id, true));
                                close();
                            }
                        >
                            "Archive"
                        </button>
                        <DeleteConfirmButton button_class="delete-btn" label="Delete" on_confirm=delete />
                        <span class="spacer"></span>
                        <button type="button" node_ref=close_button on:click=move |_| close()>"Close"</button>
                    </div>
                </div>
            </div>
        })
    }
}
