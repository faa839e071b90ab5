//! Repository Layer
//!
//! Browser-local persistence. The whole dataset lives as one JSON document
//! under a single storage key; every operation reads it, applies one
//! change and writes it back, so each call is atomic.

mod backend;
mod dataset;
mod error;

use async_trait::async_trait;
use leptos_reorder::{EntityKind, OrderStore, UpdatedEntity};
use tracing::{debug, warn};

use crate::models::{Board, Child, Item, ItemPatch, ItemTag, List, Tag};

pub use backend::{Backend, BrowserStorage, MemoryBackend};
pub use dataset::{BoardContents, Dataset};
pub use error::{StoreError, StoreResult};

pub struct LocalStore {
    backend: Box<dyn Backend>,
    key: String,
}

impl LocalStore {
    pub fn new(backend: Box<dyn Backend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// `localStorage` when the browser allows it, memory otherwise
    pub fn open(key: &str) -> Self {
        match BrowserStorage::open() {
            Ok(storage) => Self::new(Box::new(storage), key),
            Err(e) => {
                warn!(error = %e, "falling back to in-memory storage");
                Self::new(Box::new(MemoryBackend::default()), key)
            }
        }
    }

    fn load(&self) -> StoreResult<Dataset> {
        match self.backend.read(&self.key)? {
            Some(json) => Dataset::from_json(&json),
            None => Ok(Dataset::default()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Dataset) -> StoreResult<T>) -> StoreResult<T> {
        f(&self.load()?)
    }

    /// Apply `f` and save. Nothing is written when `f` fails.
    fn transact<T>(&self, f: impl FnOnce(&mut Dataset) -> StoreResult<T>) -> StoreResult<T> {
        let mut data = self.load()?;
        let out = f(&mut data)?;
        self.backend.write(&self.key, &data.to_json()?)?;
        Ok(out)
    }

    // ========================
    // Boards
    // ========================

    pub async fn list_boards(&self) -> StoreResult<Vec<Board>> {
        self.read(|data| Ok(data.active_boards()))
    }

    pub async fn create_board(&self, title: &str) -> StoreResult<Board> {
        let board = self.transact(|data| Ok(data.create_board(title)))?;
        debug!(id = board.id, uuid = %board.uuid, "board created");
        Ok(board)
    }

    pub async fn list_archived_boards(&self) -> StoreResult<Vec<Board>> {
        self.read(|data| Ok(data.archived_boards()))
    }

    pub async fn rename_board(&self, id: u32, title: &str) -> StoreResult<Board> {
        self.transact(|data| data.rename_board(id, title))
    }

    pub async fn set_board_archived(&self, id: u32, archived: bool) -> StoreResult<Board> {
        let board = self.transact(|data| data.set_board_archived(id, archived))?;
        debug!(id, archived, "board archive flag changed");
        Ok(board)
    }

    pub async fn delete_board(&self, id: u32) -> StoreResult<()> {
        self.transact(|data| data.delete_board(id))
    }

    pub async fn load_board(&self, board_id: u32) -> StoreResult<BoardContents> {
        self.read(|data| data.board_contents(board_id))
    }

    // ========================
    // Lists and items
    // ========================

    pub async fn create_list(&self, board_id: u32, title: &str) -> StoreResult<List> {
        self.transact(|data| data.create_list(board_id, title))
    }

    pub async fn set_list_archived(&self, id: u32, archived: bool) -> StoreResult<List> {
        self.transact(|data| data.set_list_archived(id, archived))
    }

    pub async fn delete_list(&self, id: u32) -> StoreResult<()> {
        self.transact(|data| data.delete_list(id))
    }

    pub async fn create_item(&self, list_id: u32, title: &str) -> StoreResult<Item> {
        self.transact(|data| data.create_item(list_id, title))
    }

    pub async fn update_item(&self, id: u32, patch: ItemPatch) -> StoreResult<Item> {
        self.transact(|data| data.update_item(id, patch))
    }

    pub async fn set_item_archived(&self, id: u32, archived: bool) -> StoreResult<Item> {
        self.transact(|data| data.set_item_archived(id, archived))
    }

    pub async fn delete_item(&self, id: u32) -> StoreResult<()> {
        self.transact(|data| data.delete_item(id))
    }

    // ========================
    // Tags
    // ========================

    pub async fn create_tag(&self, board_id: u32, title: &str, color: &str) -> StoreResult<Tag> {
        self.transact(|data| data.create_tag(board_id, title, color))
    }

    pub async fn update_tag(&self, id: u32, title: &str, color: &str) -> StoreResult<Tag> {
        self.transact(|data| data.update_tag(id, title, color))
    }

    pub async fn delete_tag(&self, id: u32) -> StoreResult<()> {
        self.transact(|data| data.delete_tag(id))
    }

    pub async fn add_item_tag(&self, item_id: u32, tag_id: u32) -> StoreResult<ItemTag> {
        self.transact(|data| data.add_item_tag(item_id, tag_id))
    }

    pub async fn remove_item_tag(&self, item_id: u32, tag_id: u32) -> StoreResult<bool> {
        self.transact(|data| Ok(data.remove_item_tag(item_id, tag_id)))
    }

    // ========================
    // Import / export
    // ========================

    pub async fn export_json(&self) -> StoreResult<String> {
        self.read(|data| data.to_json())
    }

    /// Replace everything with a dump
    pub async fn import_json(&self, json: &str) -> StoreResult<()> {
        let imported = Dataset::from_json(json)?;
        self.transact(|data| {
            *data = imported;
            Ok(())
        })
    }
}

#[async_trait(?Send)]
impl OrderStore for LocalStore {
    type Child = Child;
    type Error = StoreError;

    async fn update_entity_order(
        &self,
        kind: EntityKind,
        id: u32,
        new_order: f64,
        new_parent_id: Option<u32>,
    ) -> StoreResult<UpdatedEntity> {
        self.transact(|data| data.update_entity_order(kind, id, new_order, new_parent_id))
    }

    async fn load_children(
        &self,
        kind: EntityKind,
        container_id: u32,
        include_archived: bool,
    ) -> StoreResult<Vec<Child>> {
        self.read(|data| Ok(data.children(kind, container_id, include_archived)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Shares one memory backend between the store under test and the test
    struct Shared(Rc<MemoryBackend>);

    impl Backend for Shared {
        fn read(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) -> StoreResult<()> {
            self.0.write(key, value)
        }
    }

    fn open_store() -> (LocalStore, Rc<MemoryBackend>) {
        let backend = Rc::new(MemoryBackend::default());
        (LocalStore::new(Box::new(Shared(backend.clone())), "test.data"), backend)
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let (store, backend) = open_store();
        let board = store.create_board("Home").await.unwrap();
        store.create_list(board.id, "Todo").await.unwrap();

        let reopened = LocalStore::new(Box::new(Shared(backend)), "test.data");
        let contents = reopened.load_board(board.id).await.unwrap();
        assert_eq!(contents.lists.len(), 1);
        assert_eq!(contents.lists[0].title, "Todo");
    }

    #[tokio::test]
    async fn test_failed_write_changes_nothing() {
        let (store, backend) = open_store();
        let board = store.create_board("Home").await.unwrap();
        let list = store.create_list(board.id, "Todo").await.unwrap();
        let item = store.create_item(list.id, "A").await.unwrap();

        backend.refuse_writes(true);
        let err = store
            .update_entity_order(EntityKind::Item, item.id, 9.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        backend.refuse_writes(false);
        let children = store.load_children(EntityKind::Item, list.id, false).await.unwrap();
        match &children[0] {
            Child::Item(i) => assert_eq!(i.order, item.order),
            other => panic!("expected item, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_children_lists() {
        let (store, _) = open_store();
        let board = store.create_board("Home").await.unwrap();
        let a = store.create_list(board.id, "A").await.unwrap();
        store.create_list(board.id, "B").await.unwrap();
        store.set_list_archived(a.id, true).await.unwrap();

        let active = store.load_children(EntityKind::List, board.id, false).await.unwrap();
        assert_eq!(active.iter().map(Child::title).collect::<Vec<_>>(), vec!["B"]);
        let all = store.load_children(EntityKind::List, board.id, true).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].kind(), EntityKind::List);
    }

    #[tokio::test]
    async fn test_import_replaces_everything() {
        let (store, _) = open_store();
        store.create_board("Old").await.unwrap();
        let dump = store.export_json().await.unwrap();

        let (other, _) = open_store();
        other.create_board("Scratch").await.unwrap();
        other.import_json(&dump).await.unwrap();
        let boards = other.list_boards().await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].title, "Old");

        assert!(other.import_json("{\"boards\": 5}").await.is_err());
        assert_eq!(other.list_boards().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_board_archive_survives_reopen() {
        let (store, backend) = open_store();
        let board = store.create_board("Home").await.unwrap();
        store.rename_board(board.id, "Work").await.unwrap();
        store.set_board_archived(board.id, true).await.unwrap();

        let reopened = LocalStore::new(Box::new(Shared(backend)), "test.data");
        assert!(reopened.list_boards().await.unwrap().is_empty());
        let archived = reopened.list_archived_boards().await.unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].title, "Work");
    }
}
