//! Storage backends
//!
//! Raw string storage under a key. The browser backend is `localStorage`;
//! the memory backend stands in when that is unavailable and in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::error::{StoreError, StoreResult};

pub trait Backend {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Storage("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl Backend for BrowserStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Storage(format!("{e:?}")))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        // Throws QuotaExceededError when full
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Storage(format!("{e:?}")))
    }
}

/// Process-local storage, lost on reload
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    refuse_writes: Cell<bool>,
}

impl MemoryBackend {
    #[cfg(test)]
    pub fn refuse_writes(&self, refuse: bool) {
        self.refuse_writes.set(refuse);
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.refuse_writes.get() {
            return Err(StoreError::Storage("quota exceeded".into()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
