//! Flat key-value persistence for board state.
//!
//! The board only needs a handful of primitives saved under fixed keys, so
//! the store is a single JSON object. `MemoryStore` keeps it in memory;
//! `FileStore` mirrors it to `board.json` on every flush, writing a temp
//! file and renaming it over the old one.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result, StoreError};

/// Opaque key-value store with string/integer/object accessors.
///
/// Setters only stage values; `flush` makes them durable.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_integer(&self, key: &str) -> Option<i64>;
    fn get_object(&self, key: &str) -> Option<Value>;
    fn contains(&self, key: &str) -> bool;

    fn set_string(&mut self, key: &str, value: &str);
    fn set_integer(&mut self, key: &str, value: i64);
    fn set_object(&mut self, key: &str, value: Value);
    fn remove(&mut self, key: &str);

    /// Persist staged values.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key)?.as_str().map(str::to_string)
    }

    fn get_integer(&self, key: &str) -> Option<i64> {
        self.entries.get(key)?.as_i64()
    }

    fn get_object(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), Value::String(value.to_string()));
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), Value::Number(value.into()));
    }

    fn set_object(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Default store location: `<data_dir>/board.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("board.json"))
    }

    /// Open the store at [`FileStore::default_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved or the
    /// file cannot be read.
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::open(path)?)
    }

    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// is moved aside to `<path>.corrupt` and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
            Ok(entries) => Ok(Self {
                inner: MemoryStore { entries },
                path,
            }),
            Err(e) => {
                let backup = Self::corrupt_path(&path);
                tracing::warn!(
                    "store at {} is unreadable ({e}), moving it to {} and starting empty",
                    path.display(),
                    backup.display()
                );
                if let Err(e) = std::fs::rename(&path, &backup) {
                    tracing::warn!("failed to move unreadable store aside: {e}");
                }
                Ok(Self::empty(path))
            }
        }
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            inner: MemoryStore::new(),
            path,
        }
    }

    fn corrupt_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.inner.get_string(key)
    }

    fn get_integer(&self, key: &str) -> Option<i64> {
        self.inner.get_integer(key)
    }

    fn get_object(&self, key: &str) -> Option<Value> {
        self.inner.get_object(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.inner.set_string(key, value);
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.inner.set_integer(key, value);
    }

    fn set_object(&mut self, key: &str, value: Value) {
        self.inner.set_object(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(&self.inner.entries).map_err(|source| {
            StoreError::Encode {
                key: "*".to_string(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, data).map_err(io_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_typed_accessors() {
        let mut store = MemoryStore::new();
        store.set_string("Goal", "Park trip");
        store.set_integer("NumberTokensEarned", 3);

        assert_eq!(store.get_string("Goal").as_deref(), Some("Park trip"));
        assert_eq!(store.get_integer("NumberTokensEarned"), Some(3));
        // Wrong type reads as absent
        assert_eq!(store.get_integer("Goal"), None);
        assert_eq!(store.get_string("NumberTokensEarned"), None);
    }

    #[test]
    fn memory_store_remove() {
        let mut store = MemoryStore::new();
        store.set_string("Skill", "Tidy up");
        assert!(store.contains("Skill"));
        store.remove("Skill");
        assert!(!store.contains("Skill"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("board.json")).unwrap();
        assert!(!store.contains("TokenArray"));
    }

    #[test]
    fn file_store_persists_across_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("board.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_string("Goal", "Ice cream");
        store.set_object("TokenArray", serde_json::json!([{"earned": true}]));
        store.flush().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_string("Goal").as_deref(), Some("Ice cream"));
        assert_eq!(
            reopened.get_object("TokenArray"),
            Some(serde_json::json!([{"earned": true}]))
        );
    }

    #[test]
    fn file_store_staged_values_are_not_durable_until_flush() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_string("Goal", "Unsaved");

        let reopened = FileStore::open(&path).unwrap();
        assert!(!reopened.contains("Goal"));
    }

    #[test]
    fn file_store_non_object_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(!store.contains("TokenArray"));
    }

    #[test]
    fn file_store_truncated_file_is_moved_aside() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");
        std::fs::write(&path, "{\n  \"Goal\": \"Ice cr").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(!store.contains("Goal"));
        let backup = temp_dir.path().join("board.json.corrupt");
        assert_eq!(
            std::fs::read_to_string(&backup).unwrap(),
            "{\n  \"Goal\": \"Ice cr"
        );

        store.set_string("Goal", "Park");
        store.flush().unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_string("Goal").as_deref(), Some("Park"));
    }

    #[test]
    fn flush_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_integer("NumberTokensEarned", 2);
        store.flush().unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("board.tmp").exists());
    }
}
