// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded local persistence: a key-value store capped per key, used for
//! saved items and histories.

pub mod bounded;
pub mod history;
pub mod saved_items;
pub mod store;

pub use bounded::{load_list, save_list, BoundedList, DEFAULT_CAPACITY};
pub use history::HistoryStore;
pub use saved_items::{SavedItem, SavedItems};
pub use store::{JsonDirStore, KeyValueStore, MemoryStore};

pub const PASSWORD_HISTORY_KEY: &str = "password-history";
pub const SPEECH_HISTORY_KEY: &str = "speech-history";

/// Store key of the saved items of one tool.
pub fn saved_items_key(tool_id: &str) -> String {
    format!("saved-items:{}", tool_id)
}
