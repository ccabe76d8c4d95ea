//! Local key-value storage.
//!
//! Backends are fallible. [`LocalStore`] sits in front of them and never
//! hands an error to its callers: failures are logged and reads degrade to
//! "no value", so a broken or full store never blocks the search bar.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Database(rusqlite::Error),
    Serialization(serde_json::Error),
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Database(e) => write!(f, "Database error: {}", e),
            StorageError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StorageError::Unavailable(reason) => write!(f, "Storage unavailable: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e)
    }
}

/// A persistent string-to-string store
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Failure-swallowing wrapper around a [`KeyValueBackend`]
pub struct LocalStore {
    backend: Box<dyn KeyValueBackend>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl LocalStore {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by memory only; nothing survives the process
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Read a value; `None` when missing or when the backend fails
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Storage read failed for '{}': {}", key, e);
                None
            }
        }
    }

    /// Write a value; returns whether the write reached the backend
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Storage write failed for '{}': {}", key, e);
                false
            }
        }
    }

    /// Remove a value; returns whether the removal reached the backend
    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Storage remove failed for '{}': {}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Backend that rejects every operation, like a disabled browser store
    pub(crate) struct BrokenBackend;

    impl KeyValueBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn test_broken_backend_degrades_to_none() {
        let mut store = LocalStore::new(BrokenBackend);

        assert!(!store.set("theme", "dark"));
        assert_eq!(store.get("theme"), None);
        assert!(!store.remove("theme"));
    }

    #[test]
    fn test_in_memory_round_trip() {
        let mut store = LocalStore::in_memory();

        assert!(store.set("searchEngine", "bing"));
        assert_eq!(store.get("searchEngine").as_deref(), Some("bing"));

        store.remove("searchEngine");
        assert_eq!(store.get("searchEngine"), None);
    }
}
