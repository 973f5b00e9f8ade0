// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for pipeline correctness.
//!
//! Validation runs every check and accumulates all problems, so a user sees the
//! whole list at once rather than fixing them one by one:
//!
//! 1. **Non-empty**: the pipeline declares at least one processor
//! 2. **Uniqueness**: processor IDs are unique
//! 3. **Implementation**: each processor names a known `impl_`
//! 4. **Options**: each processor's `options` deserialize and pass range checks
//! 5. **Storage**: `storage.max_items` is within bounds
//!
//! # Example
//! ```rust
//! use the_textkit::config::{parse_config, validate_config};
//! use the_textkit::errors::ValidationError;
//!
//! let config = parse_config(
//!     "processors:\n  - id: x\n    impl_: rot13\n",
//! ).unwrap();
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::UnknownImplementation {
//!         processor_id: "x".to_string(),
//!         impl_name: "rot13".to_string(),
//!     }]
//! );
//! ```

use std::collections::HashSet;

use crate::backends::local::LocalProcessorFactory;
use crate::config::consts::MAX_STORED_ITEMS;
use crate::config::{Config, ProcessorConfig};
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    ValidationCompleted, ValidationFailed, ValidationIssue, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// Validate a configuration before building its runtime.
///
/// # Returns
///
/// * `Ok(())` - Every processor can be instantiated
/// * `Err(Vec<ValidationError>)` - All problems found, in declaration order
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    ValidationStarted {
        processor_count: config.processors.len(),
    }
    .log();

    let mut errors = Vec::new();

    if config.processors.is_empty() {
        errors.push(ValidationError::EmptyPipeline);
    }
    errors.extend(validate_unique_processor_ids(config));
    for processor in &config.processors {
        errors.extend(validate_processor(processor));
    }
    if let Some(storage) = &config.storage {
        if !(1..=MAX_STORED_ITEMS).contains(&storage.max_items) {
            errors.push(ValidationError::InvalidStorage {
                reason: format!(
                    "max_items must be between 1 and {}, got {}",
                    MAX_STORED_ITEMS, storage.max_items
                ),
            });
        }
    }

    if errors.is_empty() {
        ValidationCompleted {
            processor_count: config.processors.len(),
        }
        .log();
        return Ok(());
    }

    for error in &errors {
        ValidationIssue {
            processor_id: processor_id_of(error),
            issue: error,
        }
        .log();
    }
    ValidationFailed {
        error_count: errors.len(),
    }
    .log();
    Err(errors)
}

/// Processor IDs key both pipeline metadata and responses, so they must be unique.
fn validate_unique_processor_ids(config: &Config) -> Vec<ValidationError> {
    let mut seen_ids = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for processor in &config.processors {
        if !seen_ids.insert(processor.id.as_str()) && reported.insert(processor.id.as_str()) {
            errors.push(ValidationError::DuplicateProcessorId {
                processor_id: processor.id.clone(),
            });
        }
    }
    errors
}

fn validate_processor(processor: &ProcessorConfig) -> Option<ValidationError> {
    let Some(impl_name) = processor.impl_.as_deref() else {
        return Some(ValidationError::MissingImplementation {
            processor_id: processor.id.clone(),
        });
    };

    if !LocalProcessorFactory::is_implementation_available(impl_name) {
        return Some(ValidationError::UnknownImplementation {
            processor_id: processor.id.clone(),
            impl_name: impl_name.to_string(),
        });
    }

    LocalProcessorFactory::create_processor(processor)
        .err()
        .map(|reason| ValidationError::InvalidOptions {
            processor_id: processor.id.clone(),
            reason,
        })
}

fn processor_id_of(error: &ValidationError) -> &str {
    match error {
        ValidationError::DuplicateProcessorId { processor_id }
        | ValidationError::MissingImplementation { processor_id }
        | ValidationError::UnknownImplementation { processor_id, .. }
        | ValidationError::InvalidOptions { processor_id, .. } => processor_id,
        ValidationError::EmptyPipeline | ValidationError::InvalidStorage { .. } => "",
    }
}
