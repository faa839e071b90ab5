//! Dataset
//!
//! The whole saved state as one serde document, and the synchronous
//! operations on it. `LocalStore` loads it, applies one operation and
//! writes it back.

use chrono::Utc;
use leptos_reorder::order::{append_order, display_order};
use leptos_reorder::{EntityKind, UpdatedEntity, ORDER_STEP};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use crate::models::{Board, Child, Item, ItemPatch, ItemTag, List, Tag};

/// Last id handed out per entity type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCounters {
    pub board: u32,
    pub list: u32,
    pub item: u32,
    pub tag: u32,
    pub item_tag: u32,
}

fn next(counter: &mut u32) -> u32 {
    *counter += 1;
    *counter
}

/// Everything on one board, as the board page needs it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardContents {
    pub lists: Vec<List>,
    pub items: Vec<Item>,
    pub tags: Vec<Tag>,
    pub item_tags: Vec<ItemTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub boards: Vec<Board>,
    pub lists: Vec<List>,
    pub items: Vec<Item>,
    pub tags: Vec<Tag>,
    pub item_tags: Vec<ItemTag>,
    pub ids: IdCounters,
}

impl Dataset {
    // ========================
    // Lookups
    // ========================

    fn board_mut(&mut self, id: u32) -> StoreResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("board", id))
    }

    fn list_mut(&mut self, id: u32) -> StoreResult<&mut List> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::not_found("list", id))
    }

    fn item_mut(&mut self, id: u32) -> StoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("item", id))
    }

    fn active_board(&self, id: u32) -> StoreResult<&Board> {
        match self.boards.iter().find(|b| b.id == id) {
            Some(b) if !b.archived => Ok(b),
            Some(_) => Err(StoreError::InvalidInput(format!("board {id} is archived"))),
            None => Err(StoreError::not_found("board", id)),
        }
    }

    fn active_list(&self, id: u32) -> StoreResult<&List> {
        match self.lists.iter().find(|l| l.id == id) {
            Some(l) if !l.archived => Ok(l),
            Some(_) => Err(StoreError::InvalidInput(format!("list {id} is archived"))),
            None => Err(StoreError::not_found("list", id)),
        }
    }

    fn board_of_item(&self, item_id: u32) -> StoreResult<u32> {
        let item = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StoreError::not_found("item", item_id))?;
        self.lists
            .iter()
            .find(|l| l.id == item.list_id)
            .map(|l| l.board_id)
            .ok_or_else(|| StoreError::not_found("list", item.list_id))
    }

    // ========================
    // Boards
    // ========================

    /// Non-archived boards by order
    pub fn active_boards(&self) -> Vec<Board> {
        let mut boards: Vec<Board> = self.boards.iter().filter(|b| !b.archived).cloned().collect();
        boards.sort_by(|a, b| a.order.total_cmp(&b.order).then(a.id.cmp(&b.id)));
        boards
    }

    pub fn create_board(&mut self, title: &str) -> Board {
        let order = self
            .boards
            .iter()
            .map(|b| b.order)
            .max_by(f64::total_cmp)
            .map_or(ORDER_STEP, |max| max + ORDER_STEP);
        let board = Board {
            id: next(&mut self.ids.board),
            uuid: Uuid::new_v4(),
            title: title.trim().to_string(),
            archived: false,
            created: Utc::now(),
            order,
        };
        self.boards.push(board.clone());
        board
    }

    /// Archived boards, most recently created first
    pub fn archived_boards(&self) -> Vec<Board> {
        let mut boards: Vec<Board> = self.boards.iter().filter(|b| b.archived).cloned().collect();
        boards.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        boards
    }

    pub fn rename_board(&mut self, id: u32, title: &str) -> StoreResult<Board> {
        let title = non_empty_title(title)?;
        let board = self.board_mut(id)?;
        board.title = title;
        Ok(board.clone())
    }

    /// Archived boards leave the home page; their contents stay intact
    pub fn set_board_archived(&mut self, id: u32, archived: bool) -> StoreResult<Board> {
        let board = self.board_mut(id)?;
        board.archived = archived;
        Ok(board.clone())
    }

    /// Remove a board with its lists, items, tags and item tags
    pub fn delete_board(&mut self, id: u32) -> StoreResult<()> {
        if !self.boards.iter().any(|b| b.id == id) {
            return Err(StoreError::not_found("board", id));
        }
        let list_ids: Vec<u32> = self.lists.iter().filter(|l| l.board_id == id).map(|l| l.id).collect();
        self.boards.retain(|b| b.id != id);
        self.lists.retain(|l| l.board_id != id);
        self.items.retain(|i| !list_ids.contains(&i.list_id));
        self.tags.retain(|t| t.board_id != id);
        self.item_tags.retain(|it| it.board_id != id);
        Ok(())
    }

    /// Active lists of a board with their active items
    pub fn board_contents(&self, board_id: u32) -> StoreResult<BoardContents> {
        self.active_board(board_id)?;
        let lists: Vec<List> = self
            .lists
            .iter()
            .filter(|l| l.board_id == board_id && !l.archived)
            .cloned()
            .collect();
        let items = self
            .items
            .iter()
            .filter(|i| !i.archived && lists.iter().any(|l| l.id == i.list_id))
            .cloned()
            .collect();
        Ok(BoardContents {
            lists,
            items,
            tags: self.tags.iter().filter(|t| t.board_id == board_id).cloned().collect(),
            item_tags: self.item_tags.iter().filter(|it| it.board_id == board_id).copied().collect(),
        })
    }

    // ========================
    // Lists and items
    // ========================

    /// New list at the end of its board
    pub fn create_list(&mut self, board_id: u32, title: &str) -> StoreResult<List> {
        self.active_board(board_id)?;
        let list = List {
            id: next(&mut self.ids.list),
            board_id,
            title: title.trim().to_string(),
            archived: false,
            created: Utc::now(),
            order: append_order(&self.lists, board_id, ORDER_STEP),
        };
        self.lists.push(list.clone());
        Ok(list)
    }

    /// Archive or restore; the order value is left alone
    pub fn set_list_archived(&mut self, id: u32, archived: bool) -> StoreResult<List> {
        let list = self.list_mut(id)?;
        list.archived = archived;
        Ok(list.clone())
    }

    pub fn delete_list(&mut self, id: u32) -> StoreResult<()> {
        if !self.lists.iter().any(|l| l.id == id) {
            return Err(StoreError::not_found("list", id));
        }
        let item_ids: Vec<u32> = self.items.iter().filter(|i| i.list_id == id).map(|i| i.id).collect();
        self.lists.retain(|l| l.id != id);
        self.items.retain(|i| i.list_id != id);
        self.item_tags.retain(|it| !item_ids.contains(&it.item_id));
        Ok(())
    }

    /// New item at the end of its list
    pub fn create_item(&mut self, list_id: u32, title: &str) -> StoreResult<Item> {
        self.active_list(list_id)?;
        let item = Item {
            id: next(&mut self.ids.item),
            list_id,
            title: title.trim().to_string(),
            content: String::new(),
            banner: None,
            archived: false,
            created: Utc::now(),
            order: append_order(&self.items, list_id, ORDER_STEP),
            referenced_items: Vec::new(),
        };
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn update_item(&mut self, id: u32, patch: ItemPatch) -> StoreResult<Item> {
        let item = self.item_mut(id)?;
        if let Some(title) = patch.title {
            item.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            item.content = content;
        }
        if let Some(banner) = patch.banner {
            item.banner = banner.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        }
        Ok(item.clone())
    }

    pub fn set_item_archived(&mut self, id: u32, archived: bool) -> StoreResult<Item> {
        let item = self.item_mut(id)?;
        item.archived = archived;
        Ok(item.clone())
    }

    pub fn delete_item(&mut self, id: u32) -> StoreResult<()> {
        if !self.items.iter().any(|i| i.id == id) {
            return Err(StoreError::not_found("item", id));
        }
        self.items.retain(|i| i.id != id);
        self.item_tags.retain(|it| it.item_id != id);
        Ok(())
    }

    // ========================
    // Tags
    // ========================

    pub fn create_tag(&mut self, board_id: u32, title: &str, color: &str) -> StoreResult<Tag> {
        self.active_board(board_id)?;
        let tag = Tag {
            id: next(&mut self.ids.tag),
            board_id,
            title: title.trim().to_string(),
            color: color.to_string(),
        };
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Change a tag's title and colour. Assignments keep pointing at it.
    pub fn update_tag(&mut self, id: u32, title: &str, color: &str) -> StoreResult<Tag> {
        let title = non_empty_title(title)?;
        let tag = self
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("tag", id))?;
        tag.title = title;
        tag.color = color.to_string();
        Ok(tag.clone())
    }

    /// Remove a tag and every assignment of it
    pub fn delete_tag(&mut self, id: u32) -> StoreResult<()> {
        if !self.tags.iter().any(|t| t.id == id) {
            return Err(StoreError::not_found("tag", id));
        }
        self.tags.retain(|t| t.id != id);
        self.item_tags.retain(|it| it.tag_id != id);
        Ok(())
    }

    /// Assign a tag. An item holds at most one assignment per tag, so
    /// assigning twice returns the existing row.
    pub fn add_item_tag(&mut self, item_id: u32, tag_id: u32) -> StoreResult<ItemTag> {
        if let Some(existing) = self.item_tags.iter().find(|it| it.item_id == item_id && it.tag_id == tag_id) {
            return Ok(*existing);
        }
        let board_id = self.board_of_item(item_id)?;
        let tag = self
            .tags
            .iter()
            .find(|t| t.id == tag_id)
            .ok_or_else(|| StoreError::not_found("tag", tag_id))?;
        if tag.board_id != board_id {
            return Err(StoreError::InvalidInput(format!(
                "tag {tag_id} belongs to another board"
            )));
        }
        let item_tag = ItemTag {
            id: next(&mut self.ids.item_tag),
            board_id,
            item_id,
            tag_id,
        };
        self.item_tags.push(item_tag);
        Ok(item_tag)
    }

    pub fn remove_item_tag(&mut self, item_id: u32, tag_id: u32) -> bool {
        let before = self.item_tags.len();
        self.item_tags.retain(|it| !(it.item_id == item_id && it.tag_id == tag_id));
        self.item_tags.len() != before
    }

    // ========================
    // Ordering
    // ========================

    /// Set one entity's order and, when given, its parent. Validation runs
    /// before anything changes, so a rejected call leaves no trace.
    pub fn update_entity_order(
        &mut self,
        kind: EntityKind,
        id: u32,
        new_order: f64,
        new_parent_id: Option<u32>,
    ) -> StoreResult<UpdatedEntity> {
        if !new_order.is_finite() {
            return Err(StoreError::InvalidInput(format!("order {new_order} is not finite")));
        }
        match kind {
            EntityKind::List => {
                if let Some(board_id) = new_parent_id {
                    self.active_board(board_id)?;
                }
                let list = self.list_mut(id)?;
                if let Some(board_id) = new_parent_id {
                    list.board_id = board_id;
                }
                list.order = new_order;
                Ok(UpdatedEntity { kind, id, container: list.board_id, order: list.order })
            }
            EntityKind::Item => {
                if let Some(list_id) = new_parent_id {
                    let target_board = self.active_list(list_id)?.board_id;
                    if self.board_of_item(id)? != target_board {
                        return Err(StoreError::InvalidInput(format!(
                            "list {list_id} is on another board"
                        )));
                    }
                }
                let item = self.item_mut(id)?;
                if let Some(list_id) = new_parent_id {
                    item.list_id = list_id;
                }
                item.order = new_order;
                Ok(UpdatedEntity { kind, id, container: item.list_id, order: item.order })
            }
        }
    }

    /// Children of a board (lists) or a list (items) in display order.
    /// With `include_archived` the archived ones follow the active ones.
    pub fn children(&self, kind: EntityKind, container_id: u32, include_archived: bool) -> Vec<Child> {
        fn collect<T: Clone + leptos_reorder::Reorderable>(
            all: &[T],
            container_id: u32,
            include_archived: bool,
        ) -> Vec<T> {
            let mut out: Vec<T> = display_order(all, container_id).into_iter().cloned().collect();
            if include_archived {
                let mut archived: Vec<&T> = all
                    .iter()
                    .filter(|e| e.container() == container_id && e.archived())
                    .collect();
                archived.sort_by(|a, b| a.order().total_cmp(&b.order()));
                out.extend(archived.into_iter().cloned());
            }
            out
        }
        match kind {
            EntityKind::List => collect(&self.lists, container_id, include_archived)
                .into_iter()
                .map(Child::List)
                .collect(),
            EntityKind::Item => collect(&self.items, container_id, include_archived)
                .into_iter()
                .map(Child::Item)
                .collect(),
        }
    }

    // ========================
    // Import / export
    // ========================

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a dump. Id counters are raised past every id present so new
    /// entities never collide with imported ones.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let mut data: Dataset = serde_json::from_str(json)?;
        data.ids.board = data.ids.board.max(data.boards.iter().map(|b| b.id).max().unwrap_or(0));
        data.ids.list = data.ids.list.max(data.lists.iter().map(|l| l.id).max().unwrap_or(0));
        data.ids.item = data.ids.item.max(data.items.iter().map(|i| i.id).max().unwrap_or(0));
        data.ids.tag = data.ids.tag.max(data.tags.iter().map(|t| t.id).max().unwrap_or(0));
        data.ids.item_tag = data
            .ids
            .item_tag
            .max(data.item_tags.iter().map(|it| it.id).max().unwrap_or(0));
        Ok(data)
    }
}

fn non_empty_title(title: &str) -> StoreResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(title.to_string())
}
