// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::ToolError;

/// Failures of the external capabilities: clipboard, downloads and speech.
///
/// None of these are fatal. Callers turn them into a user notification and
/// abandon the operation.
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The request was refused before reaching the capability.
    #[error(transparent)]
    Input(#[from] ToolError),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Download failed: {0}")]
    Download(#[from] std::io::Error),

    #[error("Failed to serialize download: {0}")]
    Serialize(#[from] serde_json::Error),
}
