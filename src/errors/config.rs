// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two processors share the same ID
    DuplicateProcessorId {
        /// The duplicate processor ID
        processor_id: String,
    },
    /// A processor entry has no `impl_` field
    MissingImplementation {
        /// The processor without an implementation name
        processor_id: String,
    },
    /// A processor names an implementation that does not exist
    UnknownImplementation {
        /// The processor that references the implementation
        processor_id: String,
        /// The implementation name that could not be resolved
        impl_name: String,
    },
    /// A processor's options could not be parsed or are out of range
    InvalidOptions {
        /// The processor whose options were rejected
        processor_id: String,
        /// Why the options were rejected
        reason: String,
    },
    /// The pipeline has no processors at all
    EmptyPipeline,
    /// The `storage` section is out of range
    InvalidStorage {
        /// Why the storage settings were rejected
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateProcessorId { processor_id } => {
                write!(f, "Duplicate processor ID: '{}'", processor_id)
            }
            ValidationError::MissingImplementation { processor_id } => {
                write!(f, "Processor '{}' is missing the 'impl_' field", processor_id)
            }
            ValidationError::UnknownImplementation {
                processor_id,
                impl_name,
            } => {
                write!(
                    f,
                    "Processor '{}' uses unknown implementation '{}'",
                    processor_id, impl_name
                )
            }
            ValidationError::InvalidOptions {
                processor_id,
                reason,
            } => {
                write!(f, "Processor '{}' has invalid options: {}", processor_id, reason)
            }
            ValidationError::EmptyPipeline => {
                write!(f, "Pipeline configuration declares no processors")
            }
            ValidationError::InvalidStorage { reason } => {
                write!(f, "Invalid storage settings: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The pipeline YAML could not be parsed.
    #[error("Failed to parse pipeline configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The settings TOML could not be parsed.
    #[error("Failed to parse settings file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but failed validation.
    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ValidationError>),
}
