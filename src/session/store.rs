//! Client-side key/value storage
//!
//! The session lives in a small string key/value store that outlives a
//! single page activation, the way browser `localStorage` does.

use std::cell::RefCell;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage is not available in this environment
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage backend
pub trait Storage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// In-memory storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStorage;

#[cfg(feature = "native")]
mod file {
    use super::{Storage, StorageError, StorageResult};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Storage persisted as a JSON object in a single file
    ///
    /// Every operation re-reads the file so separate CLI invocations see
    /// each other's writes. A missing file is an empty store.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => serde_json::from_str(&content)
                    .map_err(|e| StorageError::Serialization(e.to_string())),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let content = serde_json::to_string_pretty(items)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;

            // Atomic replace
            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, content)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl Storage for FileStorage {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            let mut items = self.read_all()?;
            items.insert(key.to_string(), value.to_string());
            self.write_all(&items)
        }

        fn remove_item(&self, key: &str) -> StorageResult<()> {
            let mut items = self.read_all()?;
            if items.remove(key).is_some() {
                self.write_all(&items)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
        storage.remove_item("missing").unwrap();
        assert_eq!(storage.len(), 0);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("isAuthenticated").unwrap(), None);

        storage.set_item("isAuthenticated", "true").unwrap();
        storage.set_item("userEmail", "a@b.com").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get_item("userEmail").unwrap().as_deref(),
            Some("a@b.com")
        );

        reopened.remove_item("isAuthenticated").unwrap();
        assert_eq!(storage.get_item("isAuthenticated").unwrap(), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("isAuthenticated"),
            Err(StorageError::Serialization(_))
        ));
    }
}
