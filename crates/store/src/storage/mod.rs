//! Key/value storage abstraction for persisted store state.
//!
//! Every durable record (users, sessions, carts, product cache) lives as a
//! JSON string under a fixed key, mirroring how a browser keeps this state in
//! `localStorage`/`sessionStorage`. Backends only need to move strings; the
//! [`Storage`] handle layers JSON encoding on top.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded as JSON.
    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value store.
///
/// Backends keep the full key space in memory, so reads are infallible;
/// only writes can touch I/O and fail.
pub trait StorageBackend: Send + Sync {
    /// Fetch the raw string stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if persisting the write fails.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if persisting the removal fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Cheaply cloneable handle over a [`StorageBackend`] with JSON helpers.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Wrap an existing backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A fresh in-memory store, used for transient state and in tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Fetch the raw string stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    /// Fetch and decode the JSON record stored under `key`.
    ///
    /// A record that fails to parse is treated as absent: the corruption is
    /// logged and `None` is returned, so callers fall back to their empty
    /// default instead of erroring.
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "discarding corrupt storage record");
                None
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if serialization fails or
    /// `StorageError::Io` if the backend cannot persist the write.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, raw)
    }

    /// Remove the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if persisting the removal fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_roundtrip() {
        let storage = Storage::in_memory();
        let record = Record {
            name: "widget".to_string(),
            count: 3,
        };

        storage.set_json("record", &record).unwrap();
        assert_eq!(storage.get_json::<Record>("record"), Some(record));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = Storage::in_memory();
        assert_eq!(storage.get_json::<Record>("nothing"), None);
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let backend = MemoryStorage::default();
        backend.set("record", "{definitely not json".to_string()).unwrap();

        let storage = Storage::new(backend);
        assert_eq!(storage.get_json::<Record>("record"), None);
        // The raw value is left in place untouched.
        assert_eq!(storage.get("record"), Some("{definitely not json".to_string()));
    }

    #[test]
    fn test_remove_clears_value() {
        let storage = Storage::in_memory();
        storage.set_json("record", &1_u32).unwrap();
        storage.remove("record").unwrap();
        assert_eq!(storage.get("record"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        storage.set_json("shared", &7_u32).unwrap();
        assert_eq!(other.get_json::<u32>("shared"), Some(7));
    }
}
