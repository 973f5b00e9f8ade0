// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration validation started.
///
/// # Log Level
/// `debug!`
pub struct ValidationStarted {
    pub processor_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating pipeline configuration: {} processors",
            self.processor_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::debug!(processor_count = self.processor_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "validation",
            span_name = name,
            processor_count = self.processor_count,
        )
    }
}

/// Configuration validation passed.
///
/// # Log Level
/// `debug!`
pub struct ValidationCompleted {
    pub processor_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline configuration is valid: {} processors",
            self.processor_count
        )
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::debug!(processor_count = self.processor_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "validation_completed",
            span_name = name,
            processor_count = self.processor_count,
        )
    }
}

/// Configuration validation found errors.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_textkit::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed { error_count: 2 };
/// assert_eq!(msg.to_string(), "Pipeline configuration has 2 validation errors");
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline configuration has {} validation errors",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "validation_failed",
            span_name = name,
            error_count = self.error_count,
        )
    }
}

/// A single validation problem.
///
/// # Log Level
/// `warn!` - Reported individually before the summary
pub struct ValidationIssue<'a> {
    pub processor_id: &'a str,
    pub issue: &'a dyn std::error::Error,
}

impl Display for ValidationIssue<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.issue)
    }
}

impl StructuredLog for ValidationIssue<'_> {
    fn log(&self) {
        tracing::warn!(processor_id = self.processor_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "validation_issue",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}
