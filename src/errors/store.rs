// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by key-value store backends.
///
/// Reads never surface parse failures (a corrupt entry reads as empty); only
/// writes and directory access can fail.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key contains characters that cannot be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}
