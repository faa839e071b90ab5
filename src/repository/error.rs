//! Persistence errors

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Browser storage missing, full or refusing writes
    #[error("storage error: {0}")]
    Storage(String),

    #[error("could not read saved data: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(what: &str, id: u32) -> Self {
        StoreError::NotFound(format!("{what} {id}"))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
