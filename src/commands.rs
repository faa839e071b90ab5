//! User Commands
//!
//! One repository call per user action, mirrored into the store. Failures
//! are logged and shown as a notification; the store is left untouched.

use leptos::prelude::*;
use leptos_reorder::{EntityKind, OrderStore};
use tracing::info;

use crate::context::AppContext;
use crate::models::{Board, Child, Item, ItemPatch, List};
use crate::store::*;

// ========================
// Boards
// ========================

pub async fn load_boards(app: AppContext, store: AppStore) {
    match app.repo().list_boards().await {
        Ok(boards) => store.boards().set(boards),
        Err(e) => app.report("load boards", e),
    }
}

pub async fn create_board(app: AppContext, store: AppStore, title: String) {
    match app.repo().create_board(&title).await {
        Ok(board) => store.boards().write().push(board),
        Err(e) => app.report("create board", e),
    }
}

pub async fn load_archived_boards(app: AppContext) -> Vec<Board> {
    match app.repo().list_archived_boards().await {
        Ok(boards) => boards,
        Err(e) => {
            app.report("load archived boards", e);
            Vec::new()
        }
    }
}

pub async fn rename_board(app: AppContext, store: AppStore, board_id: u32, title: String) {
    match app.repo().rename_board(board_id, &title).await {
        Ok(board) => store_upsert_board(&store, board),
        Err(e) => app.report("rename board", e),
    }
}

/// Archiving drops the board from the home page; restoring puts it back
pub async fn set_board_archived(app: AppContext, store: AppStore, board_id: u32, archived: bool) {
    match app.repo().set_board_archived(board_id, archived).await {
        Ok(_) if archived => store.boards().write().retain(|b| b.id != board_id),
        Ok(board) => {
            store_upsert_board(&store, board);
            store.boards().write().sort_by(|a, b| a.order.total_cmp(&b.order).then(a.id.cmp(&b.id)));
        }
        Err(e) => app.report("archive board", e),
    }
}

pub async fn delete_board(app: AppContext, store: AppStore, board_id: u32) {
    match app.repo().delete_board(board_id).await {
        Ok(()) => store.boards().write().retain(|b| b.id != board_id),
        Err(e) => app.report("delete board", e),
    }
}

/// Load a board's contents and show it
pub async fn open_board(app: AppContext, store: AppStore, board_id: u32) {
    match app.repo().load_board(board_id).await {
        Ok(contents) => {
            info!(board_id, lists = contents.lists.len(), items = contents.items.len(), "board opened");
            store_open_board(&store, board_id, contents);
        }
        Err(e) => app.report("open board", e),
    }
}

// ========================
// Lists and items
// ========================

pub async fn create_list(app: AppContext, store: AppStore, board_id: u32, title: String) {
    match app.repo().create_list(board_id, &title).await {
        Ok(list) => store_upsert_list(&store, list),
        Err(e) => app.report("add list", e),
    }
}

pub async fn set_list_archived(app: AppContext, store: AppStore, list_id: u32, archived: bool) {
    match app.repo().set_list_archived(list_id, archived).await {
        Ok(list) if archived => store_remove_list(&store, list.id),
        Ok(list) => open_board(app, store, list.board_id).await,
        Err(e) => app.report("archive list", e),
    }
}

pub async fn delete_list(app: AppContext, list_id: u32) -> bool {
    match app.repo().delete_list(list_id).await {
        Ok(()) => true,
        Err(e) => {
            app.report("delete list", e);
            false
        }
    }
}

pub async fn create_item(app: AppContext, store: AppStore, list_id: u32, title: String) {
    match app.repo().create_item(list_id, &title).await {
        Ok(item) => store_upsert_item(&store, item),
        Err(e) => app.report("add item", e),
    }
}

/// Save editor changes: fields first, then tag assignments
pub async fn save_item(
    app: AppContext,
    store: AppStore,
    item_id: u32,
    patch: ItemPatch,
    add_tags: Vec<u32>,
    remove_tags: Vec<u32>,
) {
    let repo = app.repo();
    match repo.update_item(item_id, patch).await {
        Ok(item) => store_upsert_item(&store, item),
        Err(e) => return app.report("save item", e),
    }
    for tag_id in add_tags {
        set_item_tag(app, store, item_id, tag_id, true).await;
    }
    for tag_id in remove_tags {
        set_item_tag(app, store, item_id, tag_id, false).await;
    }
}

/// Archive hides the item from the board; restoring reloads the board
pub async fn set_item_archived(app: AppContext, store: AppStore, item_id: u32, archived: bool) {
    match app.repo().set_item_archived(item_id, archived).await {
        Ok(item) if archived => {
            store.items().write().retain(|i| i.id != item.id);
        }
        Ok(_) => {
            if let Some(board_id) = store.current_board().get_untracked() {
                open_board(app, store, board_id).await;
            }
        }
        Err(e) => app.report("archive item", e),
    }
}

pub async fn delete_item(app: AppContext, store: AppStore, item_id: u32) {
    match app.repo().delete_item(item_id).await {
        Ok(()) => store_remove_item(&store, item_id),
        Err(e) => app.report("delete item", e),
    }
}

/// Archived lists of a board and archived items of any of its lists
pub async fn load_archived(app: AppContext, board_id: u32) -> (Vec<List>, Vec<Item>) {
    let repo = app.repo();
    let lists: Vec<List> = match repo.load_children(EntityKind::List, board_id, true).await {
        Ok(children) => children
            .into_iter()
            .filter_map(|c| match c {
                Child::List(l) => Some(l),
                Child::Item(_) => None,
            })
            .collect(),
        Err(e) => {
            app.report("load archive", e);
            return (Vec::new(), Vec::new());
        }
    };
    let mut items = Vec::new();
    for list in &lists {
        match repo.load_children(EntityKind::Item, list.id, true).await {
            Ok(children) => items.extend(children.into_iter().filter_map(|c| match c {
                Child::Item(i) if i.archived => Some(i),
                _ => None,
            })),
            Err(e) => app.report("load archive", e),
        }
    }
    let archived_lists = lists.into_iter().filter(|l| l.archived).collect();
    (archived_lists, items)
}

// ========================
// Tags
// ========================

pub async fn create_tag(app: AppContext, store: AppStore, board_id: u32, title: String, color: String) {
    match app.repo().create_tag(board_id, &title, &color).await {
        Ok(tag) => store_add_tag(&store, tag),
        Err(e) => app.report("create tag", e),
    }
}

pub async fn update_tag(app: AppContext, store: AppStore, tag_id: u32, title: String, color: String) {
    match app.repo().update_tag(tag_id, &title, &color).await {
        Ok(tag) => store_update_tag(&store, tag),
        Err(e) => app.report("edit tag", e),
    }
}

pub async fn delete_tag(app: AppContext, store: AppStore, tag_id: u32) {
    match app.repo().delete_tag(tag_id).await {
        Ok(()) => store_remove_tag(&store, tag_id),
        Err(e) => app.report("delete tag", e),
    }
}

pub async fn set_item_tag(app: AppContext, store: AppStore, item_id: u32, tag_id: u32, on: bool) {
    let repo = app.repo();
    if on {
        match repo.add_item_tag(item_id, tag_id).await {
            Ok(item_tag) => store_add_item_tag(&store, item_tag),
            Err(e) => app.report("tag item", e),
        }
    } else {
        match repo.remove_item_tag(item_id, tag_id).await {
            Ok(_) => store_remove_item_tag(&store, item_id, tag_id),
            Err(e) => app.report("untag item", e),
        }
    }
}

// ========================
// Import / export
// ========================

pub async fn export_data(app: AppContext) -> Option<String> {
    match app.repo().export_json().await {
        Ok(json) => Some(json),
        Err(e) => {
            app.report("export", e);
            None
        }
    }
}

/// Replace all data with a dump and return to the home page
pub async fn import_data(app: AppContext, store: AppStore, json: String) {
    match app.repo().import_json(&json).await {
        Ok(()) => {
            store_close_board(&store);
            load_boards(app, store).await;
            app.notify("Import complete");
        }
        Err(e) => app.report("import", e),
    }
}
