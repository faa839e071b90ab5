//! Persistence seam
//!
//! What the engine needs from the store. Writes carry absolute order
//! values, so two commits resolving out of order cannot corrupt ordering.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::EntityKind;

/// Entity as saved by the store
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdatedEntity {
    pub kind: EntityKind,
    pub id: u32,
    pub container: u32,
    pub order: f64,
}

#[async_trait(?Send)]
pub trait OrderStore {
    /// Child entity type handed back by [`OrderStore::load_children`]
    type Child;
    type Error: std::fmt::Display;

    /// Set `order` (and, when given, the parent container) of one entity.
    /// Must be atomic per entity.
    async fn update_entity_order(
        &self,
        kind: EntityKind,
        id: u32,
        new_order: f64,
        new_parent_id: Option<u32>,
    ) -> Result<UpdatedEntity, Self::Error>;

    /// Children of `container_id`; lazily hydrates archive panels
    async fn load_children(
        &self,
        kind: EntityKind,
        container_id: u32,
        include_archived: bool,
    ) -> Result<Vec<Self::Child>, Self::Error>;
}
