// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Most-recent-first list with a fixed capacity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::store::KeyValueStore;
use crate::errors::StoreError;
use crate::observability::messages::storage::StoredValueUnreadable;
use crate::observability::messages::StructuredLog;

/// Capacity shared by saved items, password history and speech history.
pub const DEFAULT_CAPACITY: usize = 10;

/// A list that keeps at most `capacity` items, newest at index 0.
///
/// Pushing onto a full list evicts the oldest item and hands it back, so callers
/// can report the eviction.
///
/// # Example
/// ```
/// use the_textkit::storage::BoundedList;
///
/// let mut list = BoundedList::new(2);
/// list.push("a");
/// list.push("b");
/// assert_eq!(list.push("c"), Some("a"));
/// assert_eq!(list.items(), &["c", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedList<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Adopt existing items (newest first), dropping any beyond `capacity`.
    pub fn from_items(mut items: Vec<T>, capacity: usize) -> Self {
        items.truncate(capacity);
        Self { items, capacity }
    }

    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        self.items.insert(0, item);
        if self.items.len() > self.capacity {
            self.items.pop()
        } else {
            None
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, f: F) {
        self.items.retain(f);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for BoundedList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a, T> IntoIterator for &'a BoundedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Read a list stored under `key`. Missing, unreadable or malformed values
/// read as an empty list.
pub fn load_list<T, S>(store: &S, key: &str, capacity: usize) -> BoundedList<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BoundedList::new(capacity),
        Err(e) => {
            StoredValueUnreadable {
                key,
                reason: &e.to_string(),
            }
            .log();
            return BoundedList::new(capacity);
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => BoundedList::from_items(items, capacity),
        Err(e) => {
            StoredValueUnreadable {
                key,
                reason: &e.to_string(),
            }
            .log();
            BoundedList::new(capacity)
        }
    }
}

/// Store the items of `list` as a JSON array under `key`.
pub fn save_list<T, S>(store: &mut S, key: &str, list: &BoundedList<T>) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(list.items())?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_push_keeps_newest_first() {
        let mut list = BoundedList::new(3);
        for i in 1..=3 {
            assert_eq!(list.push(i), None);
        }
        assert_eq!(list.items(), &[3, 2, 1]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut list = BoundedList::default();
        for i in 0..DEFAULT_CAPACITY {
            list.push(i);
        }
        assert_eq!(list.push(99), Some(0));
        assert_eq!(list.len(), DEFAULT_CAPACITY);
        assert_eq!(list.first(), Some(&99));
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut list = BoundedList::new(0);
        assert_eq!(list.push("x"), Some("x"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_from_items_truncates() {
        let list = BoundedList::from_items(vec![5, 4, 3, 2, 1], 2);
        assert_eq!(list.items(), &[5, 4]);
        assert_eq!(list.capacity(), 2);
    }

    #[test]
    fn test_remove_retain_clear() {
        let mut list = BoundedList::from_items(vec!["a", "b", "c"], 10);
        assert_eq!(list.remove(1), Some("b"));
        assert_eq!(list.remove(7), None);
        list.retain(|item| *item != "a");
        assert_eq!(list.items(), &["c"]);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_and_save_list() {
        let mut store = MemoryStore::new();
        let mut list = BoundedList::new(3);
        list.push("first".to_string());
        list.push("second".to_string());
        save_list(&mut store, "speech-history", &list).unwrap();
        assert_eq!(
            store.get("speech-history").unwrap().as_deref(),
            Some(r#"["second","first"]"#)
        );

        let loaded: BoundedList<String> = load_list(&store, "speech-history", 1);
        assert_eq!(loaded.items(), &["second".to_string()]);
    }

    #[test]
    fn test_load_list_treats_garbage_as_empty() {
        let mut store = MemoryStore::new();
        store.set("speech-history", "{not json").unwrap();
        let loaded: BoundedList<String> = load_list(&store, "speech-history", 10);
        assert!(loaded.is_empty());

        let missing: BoundedList<String> = load_list(&store, "password-history", 10);
        assert!(missing.is_empty());
        assert_eq!(missing.capacity(), 10);
    }
}
