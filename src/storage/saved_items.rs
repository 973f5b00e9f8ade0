// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-tool saved results, newest first, capped at ten.

use serde::{Deserialize, Serialize};

use super::bounded::{load_list, save_list, BoundedList};
use super::saved_items_key;
use super::store::KeyValueStore;
use crate::errors::StoreError;
use crate::observability::messages::storage::EntriesEvicted;
use crate::observability::messages::StructuredLog;

/// Characters of the input used as a title when none is given.
const DERIVED_TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: String,
    pub title: String,
    pub input: String,
    pub output: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl SavedItem {
    pub fn new(title: Option<&str>, input: &str, output: &str, timestamp: i64) -> Self {
        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => input.trim().chars().take(DERIVED_TITLE_CHARS).collect(),
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            input: input.to_string(),
            output: output.to_string(),
            timestamp,
        }
    }
}

/// The saved items of one tool, backed by a [`KeyValueStore`]. Every mutation
/// is written through before it is applied in memory.
pub struct SavedItems<S: KeyValueStore> {
    store: S,
    key: String,
    items: BoundedList<SavedItem>,
}

impl<S: KeyValueStore> SavedItems<S> {
    pub fn open(store: S, tool_id: &str, capacity: usize) -> Self {
        let key = saved_items_key(tool_id);
        let items = load_list(&store, &key, capacity);
        Self { store, key, items }
    }

    pub fn items(&self) -> &[SavedItem] {
        self.items.items()
    }

    pub fn get(&self, id: &str) -> Option<&SavedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Save an item at the front, evicting the oldest when full. Nothing
    /// changes when the store write fails.
    pub fn save(&mut self, item: SavedItem) -> Result<(), StoreError> {
        let mut items = self.items.clone();
        let evicted = items.push(item).is_some();
        save_list(&mut self.store, &self.key, &items)?;

        if evicted {
            EntriesEvicted {
                key: &self.key,
                evicted: 1,
                capacity: items.capacity(),
            }
            .log();
        }
        self.items = items;
        Ok(())
    }

    /// Returns whether an item was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut items = self.items.clone();
        items.retain(|item| item.id != id);
        if items.len() == self.items.len() {
            return Ok(false);
        }
        save_list(&mut self.store, &self.key, &items)?;
        self.items = items;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(&self.key)?;
        self.items.clear();
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
