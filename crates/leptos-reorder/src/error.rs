//! Engine errors

use thiserror::Error;

use crate::session::EntityKind;

pub type ReorderResult<T> = Result<T, ReorderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReorderError {
    /// Target container was removed while the drag was in flight
    #[error("target container {0} no longer exists")]
    ContainerMissing(u32),

    #[error("{kind} {id} not found")]
    EntityMissing { kind: EntityKind, id: u32 },

    /// Store rejected the write; in-memory state has been rolled back
    #[error("failed to save new position: {0}")]
    Persistence(String),
}
