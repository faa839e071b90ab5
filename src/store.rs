//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the open
//! board's active lists, items and tags; archived entities are only loaded
//! on demand by the archived panel.

use leptos::prelude::*;
use leptos_reorder::order::display_order;
use leptos_reorder::{EntityKind, Placed, ReorderState, Snapshot};
use reactive_stores::Store;

use crate::models::{Board, Item, ItemTag, List, Tag};
use crate::repository::BoardContents;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Active boards for the home page
    pub boards: Vec<Board>,
    /// Open board; `None` shows the home page
    pub current_board: Option<u32>,
    pub lists: Vec<List>,
    pub items: Vec<Item>,
    pub tags: Vec<Tag>,
    pub item_tags: Vec<ItemTag>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the open board's contents
pub fn store_open_board(store: &AppStore, board_id: u32, contents: BoardContents) {
    store.lists().set(contents.lists);
    store.items().set(contents.items);
    store.tags().set(contents.tags);
    store.item_tags().set(contents.item_tags);
    store.current_board().set(Some(board_id));
}

pub fn store_close_board(store: &AppStore) {
    store.current_board().set(None);
    store.lists().write().clear();
    store.items().write().clear();
    store.tags().write().clear();
    store.item_tags().write().clear();
}

/// Insert or replace a list by ID
pub fn store_upsert_list(store: &AppStore, list: List) {
    let lists_field = store.lists();
    let mut lists = lists_field.write();
    match lists.iter_mut().find(|l| l.id == list.id) {
        Some(existing) => *existing = list,
        None => lists.push(list),
    }
}

/// Drop a list and its items from the store
pub fn store_remove_list(store: &AppStore, list_id: u32) {
    store.lists().write().retain(|l| l.id != list_id);
    store.items().write().retain(|i| i.list_id != list_id);
}

/// Insert or replace an item by ID
pub fn store_upsert_item(store: &AppStore, item: Item) {
    let items_field = store.items();
    let mut items = items_field.write();
    match items.iter_mut().find(|i| i.id == item.id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

pub fn store_remove_item(store: &AppStore, item_id: u32) {
    store.items().write().retain(|i| i.id != item_id);
    store.item_tags().write().retain(|it| it.item_id != item_id);
}

pub fn store_add_tag(store: &AppStore, tag: Tag) {
    store.tags().write().push(tag);
}

/// Replace a tag by ID
pub fn store_update_tag(store: &AppStore, tag: Tag) {
    if let Some(existing) = store.tags().write().iter_mut().find(|t| t.id == tag.id) {
        *existing = tag;
    }
}

/// Insert or replace a board by ID
pub fn store_upsert_board(store: &AppStore, board: Board) {
    let boards_field = store.boards();
    let mut boards = boards_field.write();
    match boards.iter_mut().find(|b| b.id == board.id) {
        Some(existing) => *existing = board,
        None => boards.push(board),
    }
}

/// Remove a tag and its assignments
pub fn store_remove_tag(store: &AppStore, tag_id: u32) {
    store.tags().write().retain(|t| t.id != tag_id);
    store.item_tags().write().retain(|it| it.tag_id != tag_id);
}

pub fn store_add_item_tag(store: &AppStore, item_tag: ItemTag) {
    let item_tags_field = store.item_tags();
    let mut item_tags = item_tags_field.write();
    if !item_tags.iter().any(|it| it.id == item_tag.id) {
        item_tags.push(item_tag);
    }
}

pub fn store_remove_item_tag(store: &AppStore, item_id: u32, tag_id: u32) {
    store
        .item_tags()
        .write()
        .retain(|it| !(it.item_id == item_id && it.tag_id == tag_id));
}

// ========================
// Ordered reads
// ========================

/// Active lists of the open board in display order
pub fn ordered_lists(store: &AppStore) -> Vec<List> {
    let Some(board_id) = store.current_board().get() else {
        return Vec::new();
    };
    store.lists().with(|lists| display_order(lists, board_id).into_iter().cloned().collect())
}

/// Active items of a list in display order
pub fn ordered_items(store: &AppStore, list_id: u32) -> Vec<Item> {
    store.items().with(|items| display_order(items, list_id).into_iter().cloned().collect())
}

/// Tags assigned to an item
pub fn item_tag_list(store: &AppStore, item_id: u32) -> Vec<Tag> {
    let assigned: Vec<u32> = store.item_tags().with(|its| {
        its.iter().filter(|it| it.item_id == item_id).map(|it| it.tag_id).collect()
    });
    store.tags().with(|tags| tags.iter().filter(|t| assigned.contains(&t.id)).cloned().collect())
}

/// The store as the reorder engine sees it
#[derive(Clone, Copy)]
pub struct BoardState(pub AppStore);

impl ReorderState for BoardState {
    fn placements(&self, kind: EntityKind) -> Vec<Placed> {
        match kind {
            EntityKind::List => self.0.lists().read_untracked().iter().map(Placed::of).collect(),
            EntityKind::Item => self.0.items().read_untracked().iter().map(Placed::of).collect(),
        }
    }

    fn container_exists(&self, kind: EntityKind, container: u32) -> bool {
        match kind {
            EntityKind::List => self.0.current_board().get_untracked() == Some(container),
            EntityKind::Item => self
                .0
                .lists()
                .read_untracked()
                .iter()
                .any(|l| l.id == container && !l.archived),
        }
    }

    fn apply_snapshot(&self, snapshot: &Snapshot) {
        match snapshot.kind {
            EntityKind::List => snapshot.apply_to(self.0.lists().write().as_mut_slice()),
            EntityKind::Item => snapshot.apply_to(self.0.items().write().as_mut_slice()),
        }
    }
}
