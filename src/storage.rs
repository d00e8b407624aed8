//! Blob Store Adapter
//!
//! Key-value string persistence with JSON helpers. Backed by the browser's
//! `localStorage`, or by an in-memory map in tests and when storage is
//! blocked.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove '{key}': {reason}")]
    Remove { key: String, reason: String },
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent string store with `get` / `set` semantics
pub trait BlobStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Whether `localStorage` can be reached (private mode may block it)
    pub fn is_available() -> bool {
        Self::storage().is_some()
    }
}

impl BlobStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.remove_item(key).map_err(|e| StorageError::Remove {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Either backend, picked at startup
#[derive(Debug, Clone)]
pub enum AppStorage {
    Browser(BrowserStorage),
    Memory(MemoryStore),
}

impl AppStorage {
    /// `localStorage` when reachable, otherwise a session-only map
    pub fn detect() -> Self {
        if BrowserStorage::is_available() {
            AppStorage::Browser(BrowserStorage)
        } else {
            log::warn!("[Storage] localStorage unavailable, mirror will not survive reload");
            AppStorage::Memory(MemoryStore::new())
        }
    }
}

impl BlobStore for AppStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            AppStorage::Browser(s) => s.get(key),
            AppStorage::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.set(key, value),
            AppStorage::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.remove(key),
            AppStorage::Memory(s) => s.remove(key),
        }
    }
}

// ========================
// JSON Helpers
// ========================

/// Parse a JSON value; missing or malformed entries read as `None`
pub fn read_json<T: DeserializeOwned>(store: &impl BlobStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("[Storage] Ignoring malformed '{}': {}", key, e);
            None
        }
    }
}

/// Parse a JSON array; anything else reads as empty
pub fn read_list<T: DeserializeOwned>(store: &impl BlobStore, key: &str) -> Vec<T> {
    read_json(store, key).unwrap_or_default()
}

/// Serialize and store a value, logging instead of failing
pub fn write_json<T: Serialize + ?Sized>(store: &impl BlobStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })
        .and_then(|raw| store.set(key, &raw));
    if let Err(e) = result {
        log::error!("[Storage] {}", e);
    }
}

/// Delete a key, logging failures. Returns whether the key is gone
pub fn remove_key(store: &impl BlobStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            log::error!("[Storage] {}", e);
            false
        }
    }
}
