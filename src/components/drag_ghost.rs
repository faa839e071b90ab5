//! Drag Ghost Component
//!
//! Floating copy of the dragged list or item that follows the pointer.
//! It renders the same body markup as the original element.

use leptos::prelude::*;
use leptos_reorder::render::ghost_style;
use leptos_reorder::{use_interaction, EntityKind};

use super::ItemCardBody;
use crate::models::{Item, List};
use crate::store::{ordered_items, use_app_store, AppStateStoreFields, AppStore};

/// What the ghost shows for a dragged entity
#[derive(Clone, Debug, PartialEq)]
pub enum GhostContent {
    Item(Item),
    List { list: List, items: Vec<Item> },
}

/// The dragged entity as currently held in the store
pub fn ghost_content(store: &AppStore, kind: EntityKind, id: u32) -> Option<GhostContent> {
    match kind {
        EntityKind::Item => store
            .items()
            .with_untracked(|items| items.iter().find(|i| i.id == id).cloned())
            .map(GhostContent::Item),
        EntityKind::List => {
            let list = store
                .lists()
                .with_untracked(|lists| lists.iter().find(|l| l.id == id).cloned())?;
            Some(GhostContent::List { list, items: ordered_items(store, id) })
        }
    }
}

#[component]
pub fn DragGhost() -> impl IntoView {
    let interaction = use_interaction();
    let store = use_app_store();

    // Rebuilt only when another entity starts dragging; the style follows the pointer
    let dragged = Memo::new(move |_| {
        interaction
            .session()
            .filter(|s| s.dragging && !s.dialog_open)
            .map(|s| (s.kind, s.id))
    });
    let style = move || {
        interaction
            .session()
            .map(|s| ghost_style(&s, interaction.pointer()))
            .unwrap_or_default()
    };

    move || {
        let (kind, id) = dragged.get()?;
        let body = match ghost_content(&store, kind, id)? {
            GhostContent::List { list, items } => view! {
                <div class="drag-ghost list-column" style=style aria-hidden="true">
                    <header class="list-header">
                        <h3>{list.title}</h3>
                        <span class="list-count">{items.len()}</span>
                    </header>
                    <div class="list-items">
                        {items
                            .into_iter()
                            .map(|item| view! { <div class="item-card"><ItemCardBody item=item /></div> })
                            .collect_view()}
                    </div>
                </div>
            }
            .into_any(),
            GhostContent::Item(item) => view! {
                <div class="drag-ghost item-card" style=style aria-hidden="true">
                    <ItemCardBody item=item />
                </div>
            }
            .into_any(),
        };
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::BoardContents;
    use crate::store::{store_open_board, AppState};
    use chrono::Utc;
    use reactive_stores::Store;

    fn item(id: u32, list_id: u32, order: f64, banner: Option<&str>) -> Item {
        Item {
            id,
            list_id,
            title: format!("I{id}"),
            content: String::new(),
            banner: banner.map(str::to_string),
            archived: false,
            created: Utc::now(),
            order,
            referenced_items: Vec::new(),
        }
    }

    fn open_store() -> AppStore {
        let store = Store::new(AppState::default());
        let list = List { id: 10, board_id: 1, title: "Todo".into(), archived: false, created: Utc::now(), order: 1.0 };
        let mut hidden = item(3, 10, 0.5, None);
        hidden.archived = true;
        store_open_board(
            &store,
            1,
            BoardContents {
                lists: vec![list],
                items: vec![item(2, 10, 2.0, None), item(1, 10, 1.0, Some("https://img/1.png")), hidden],
                ..Default::default()
            },
        );
        store
    }

    #[test]
    fn test_item_ghost_keeps_banner() {
        let owner = Owner::new();
        owner.with(|| {
            let store = open_store();
            match ghost_content(&store, EntityKind::Item, 1) {
                Some(GhostContent::Item(i)) => assert_eq!(i.banner.as_deref(), Some("https://img/1.png")),
                other => panic!("expected item ghost, got {:?}", other),
            }
            assert_eq!(ghost_content(&store, EntityKind::Item, 99), None);
        });
    }

    #[test]
    fn test_list_ghost_carries_its_items_in_order() {
        let owner = Owner::new();
        owner.with(|| {
            let store = open_store();
            match ghost_content(&store, EntityKind::List, 10) {
                Some(GhostContent::List { list, items }) => {
                    assert_eq!(list.title, "Todo");
                    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
                }
                other => panic!("expected list ghost, got {:?}", other),
            }
        });
    }
}
