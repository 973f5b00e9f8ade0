// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

/// String-keyed storage of serialized values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory. `:` in keys maps to `.`
/// in file names.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    directory: PathBuf,
}

impl JsonDirStore {
    /// Open the store, creating the directory if needed.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
        if !valid || key.contains("..") {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.directory.join(format!("{}.json", key.replace(':', "."))))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key)?, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("saved-items:slug").unwrap(), None);
        store.set("saved-items:slug", "[1,2]").unwrap();
        assert_eq!(store.get("saved-items:slug").unwrap().as_deref(), Some("[1,2]"));
        store.set("saved-items:slug", "[]").unwrap();
        assert_eq!(store.get("saved-items:slug").unwrap().as_deref(), Some("[]"));
        store.remove("saved-items:slug").unwrap();
        store.remove("saved-items:slug").unwrap();
        assert_eq!(store.get("saved-items:slug").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn test_json_dir_store() {
        let temp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(temp.path().join("state")).unwrap();
        exercise(&mut store);

        store.set("password-history", "[]").unwrap();
        assert!(temp.path().join("state").join("password-history.json").exists());
    }

    #[test]
    fn test_json_dir_store_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        JsonDirStore::open(temp.path()).unwrap().set("speech-history", "[\"hi\"]").unwrap();
        let reopened = JsonDirStore::open(temp.path()).unwrap();
        assert_eq!(reopened.get("speech-history").unwrap().as_deref(), Some("[\"hi\"]"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(temp.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden", "a..b", "spaces here"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
