// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tool histories kept across runs, one bounded list per key.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::bounded::{load_list, save_list, BoundedList};
use super::store::{JsonDirStore, KeyValueStore};
use crate::errors::StoreError;
use crate::observability::messages::storage::StoredValueUnwritable;
use crate::observability::messages::StructuredLog;

/// A store shared by every processor that keeps a history.
///
/// Clones share the underlying store, so two processors recording under the
/// same key see each other's entries.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<Mutex<Box<dyn KeyValueStore>>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(store: impl KeyValueStore + 'static, capacity: usize) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
            capacity,
        }
    }

    /// Keep histories as JSON files in `directory`, creating it if needed.
    pub fn open(directory: impl AsRef<Path>, capacity: usize) -> Result<Self, StoreError> {
        Ok(Self::new(JsonDirStore::open(directory)?, capacity))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> BoundedList<T> {
        let store = self.store.lock().await;
        load_list(&**store, key, self.capacity)
    }

    /// Re-read the list under `key`, apply `change` and write it back, all
    /// under one lock. A failed write is logged; the changed list is returned
    /// either way.
    pub async fn update<T, F>(&self, key: &str, change: F) -> BoundedList<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut BoundedList<T>),
    {
        let mut store = self.store.lock().await;
        let mut list = load_list(&**store, key, self.capacity);
        change(&mut list);
        if let Err(e) = save_list(&mut **store, key, &list) {
            StoredValueUnwritable {
                key,
                reason: &e.to_string(),
            }
            .log();
        }
        list
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("capacity", &self.capacity)
            .finish()
    }
}
