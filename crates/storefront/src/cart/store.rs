//! Write-through persistence for the cart.
//!
//! The engine treats persistence as a pure serialization sink: [`CartStore`]
//! never surfaces an error. A failed load yields an empty cart; a failed
//! save is logged and the in-memory list stays the session's source of
//! truth (it just won't survive a restart).

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::models::CartLineItem;

/// Storage key the serialized cart lives under.
const CART_KEY: &str = "cart";

/// Minimal durable key-value storage: string values under fixed keys.
///
/// Processes sharing the same backing storage are last-write-wins; there is
/// no cross-process coordination.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value for `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium rejects the write.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium rejects the delete.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-backed storage: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("storage mutex poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("storage mutex poisoned"))?
            .remove(key);
        Ok(())
    }
}

/// JSON (de)serialization of the cart line list over a [`KeyValueStorage`].
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CartStore {
    /// Create a store over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Load the previously saved line list.
    ///
    /// Missing or unreadable data yields an empty list; deserialization
    /// failures are logged, never raised.
    #[must_use]
    pub fn load(&self) -> Vec<CartLineItem> {
        let Some(raw) = self.storage.get(CART_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to deserialize saved cart, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize and write the full line list, replacing any prior value.
    ///
    /// Failures are logged and swallowed.
    pub fn save(&self, items: &[CartLineItem]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_KEY, &raw) {
            warn!(error = %e, "Failed to persist cart, in-memory state continues");
        }
    }
}
