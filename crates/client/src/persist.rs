//! Durable client-side state.
//!
//! Session and wishlist state survive restarts through a small key-value
//! port. Stores receive the port by injection so tests can substitute the
//! in-memory implementation. The cart is deliberately never persisted;
//! prices and stock change server-side, so it is re-fetched at session
//! start.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Fixed keys for persisted state.
pub mod keys {
    /// Key for the persisted session (token and profile).
    pub const AUTH: &str = "auth-storage";

    /// Key for the persisted wishlist items.
    pub const WISHLIST: &str = "wishlist-storage";
}

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value port for persisted client state.
pub trait StateStore: Send + Sync {
    /// Load the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

// =============================================================================
// File-backed implementation
// =============================================================================

/// File-backed state store: one JSON file per key inside a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// In-memory state store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self
            .entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or(None))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}

// =============================================================================
// JSON helpers
// =============================================================================

/// Persist a value as JSON; failures are logged, never surfaced.
///
/// Persistence is best-effort: a failed write leaves the in-memory state
/// authoritative for the rest of the session.
pub(crate) fn save_json<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(PersistError::from)
        .and_then(|json| store.save(key, &json));
    if let Err(err) = result {
        warn!(key, error = %err, "Failed to persist client state");
    }
}

/// Load a JSON value; parse failures are logged and treated as absent.
pub(crate) fn load_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let raw = match store.load(key) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key, error = %err, "Failed to load persisted client state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "Discarding unreadable persisted state");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("missing").unwrap().is_none());

        store.save(keys::WISHLIST, "[1,2,3]").unwrap();
        assert_eq!(store.load(keys::WISHLIST).unwrap().as_deref(), Some("[1,2,3]"));

        store.remove(keys::WISHLIST).unwrap();
        assert!(store.load(keys::WISHLIST).unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.load(keys::AUTH).unwrap().is_none());
        store.save(keys::AUTH, r#"{"token":"t"}"#).unwrap();
        assert_eq!(
            store.load(keys::AUTH).unwrap().as_deref(),
            Some(r#"{"token":"t"}"#)
        );

        // Removing twice is fine.
        store.remove(keys::AUTH).unwrap();
        store.remove(keys::AUTH).unwrap();
        assert!(store.load(keys::AUTH).unwrap().is_none());
    }

    #[test]
    fn test_load_json_discards_garbage() {
        let store = MemoryStore::new();
        store.save(keys::AUTH, "not json at all").unwrap();
        let loaded: Option<Vec<u8>> = load_json(&store, keys::AUTH);
        assert!(loaded.is_none());
    }
}
