// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! CLI settings read from `textkit.toml`.
//!
//! ```toml
//! output = "json"
//! download_dir = "./downloads"
//! storage_dir = "./.textkit"
//! max_items = 10
//! clipboard_command = "xclip -selection clipboard"
//! ```

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::consts::{DEFAULT_MAX_ITEMS, DEFAULT_STORAGE_DIR};
use crate::config::StorageConfig;
use crate::errors::ConfigError;

/// How the CLI prints results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// The payload as plain text, metadata on stderr.
    #[default]
    Text,
    /// Payload, metadata and failures as one JSON document.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputMode,
    /// Where `--download` exports are written; the working directory when unset.
    pub download_dir: Option<PathBuf>,
    /// Saved items and histories kept per tool.
    pub max_items: usize,
    /// Command that reads `--copy` text on stdin; the platform default when unset.
    pub clipboard_command: Option<String>,
    pub storage_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputMode::Text,
            download_dir: None,
            max_items: DEFAULT_MAX_ITEMS,
            clipboard_command: None,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// The storage block a pipeline gets when its config has none.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            directory: self.storage_dir.clone(),
            max_items: self.max_items,
        }
    }
}
