//! Frontend Models
//!
//! Persistent entities of the board editor.

use chrono::{DateTime, Utc};
use leptos_reorder::{EntityKind, Reorderable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    /// Stable external id
    pub uuid: Uuid,
    pub title: String,
    pub archived: bool,
    pub created: DateTime<Utc>,
    /// Position among boards
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: u32,
    pub board_id: u32,
    pub title: String,
    pub archived: bool,
    pub created: DateTime<Utc>,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub list_id: u32,
    pub title: String,
    pub content: String,
    /// Image URL shown above the title
    #[serde(default)]
    pub banner: Option<String>,
    pub archived: bool,
    pub created: DateTime<Utc>,
    pub order: f64,
    #[serde(default)]
    pub referenced_items: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub board_id: u32,
    pub title: String,
    pub color: String,
}

/// Item to tag association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTag {
    pub id: u32,
    pub board_id: u32,
    pub item_id: u32,
    pub tag_id: u32,
}

/// Fields of an item the editor may change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the banner
    pub banner: Option<Option<String>>,
}

impl Reorderable for List {
    fn id(&self) -> u32 {
        self.id
    }
    fn container(&self) -> u32 {
        self.board_id
    }
    fn order(&self) -> f64 {
        self.order
    }
    fn archived(&self) -> bool {
        self.archived
    }
    fn place(&mut self, container: u32, order: f64) {
        self.board_id = container;
        self.order = order;
    }
}

impl Reorderable for Item {
    fn id(&self) -> u32 {
        self.id
    }
    fn container(&self) -> u32 {
        self.list_id
    }
    fn order(&self) -> f64 {
        self.order
    }
    fn archived(&self) -> bool {
        self.archived
    }
    fn place(&mut self, container: u32, order: f64) {
        self.list_id = container;
        self.order = order;
    }
}

/// A list or an item, as handed back by child loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Child {
    List(List),
    Item(Item),
}

impl Child {
    pub fn kind(&self) -> EntityKind {
        match self {
            Child::List(_) => EntityKind::List,
            Child::Item(_) => EntityKind::Item,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Child::List(list) => list.id,
            Child::Item(item) => item.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Child::List(list) => &list.title,
            Child::Item(item) => &item.title,
        }
    }
}
