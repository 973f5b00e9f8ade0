// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Directory holding the JSON stores when a pipeline does not name one
pub const DEFAULT_STORAGE_DIR: &str = ".textkit";
/// Saved items kept per tool (newest first, oldest evicted)
pub const DEFAULT_MAX_ITEMS: usize = crate::storage::DEFAULT_CAPACITY;
/// Upper bound for `storage.max_items`
pub const MAX_STORED_ITEMS: usize = 100;
/// CLI settings file, looked up in the working directory
pub const SETTINGS_FILE: &str = "textkit.toml";
