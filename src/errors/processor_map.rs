// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for processor map creation and processor instantiation.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during processor map creation
#[derive(Debug)]
pub enum ProcessorMapError {
    /// No local implementation matches the configured name
    UnknownImplementation {
        processor_id: String,
        impl_name: String,
    },

    /// Failed to create a processor from configuration
    ProcessorCreationFailed {
        processor_id: String,
        reason: String,
    },

    /// The configured storage directory could not be opened
    StorageUnavailable { directory: PathBuf, reason: String },
}

impl fmt::Display for ProcessorMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorMapError::UnknownImplementation {
                processor_id,
                impl_name,
            } => {
                write!(
                    f,
                    "Unknown implementation '{}' for processor '{}'. Run `textkit list` to see the available tools.",
                    impl_name, processor_id
                )
            }
            ProcessorMapError::ProcessorCreationFailed {
                processor_id,
                reason,
            } => {
                write!(f, "Failed to create processor '{}': {}", processor_id, reason)
            }
            ProcessorMapError::StorageUnavailable { directory, reason } => {
                write!(f, "Storage directory '{}' is unavailable: {}", directory.display(), reason)
            }
        }
    }
}

impl Error for ProcessorMapError {}
