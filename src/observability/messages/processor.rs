// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor execution and lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Processor instantiation from configuration
//! * Processor execution lifecycle (start, completion, failure)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Processor execution started.
///
/// # Log Level
/// `debug!` - Per-request detail
///
/// # Example
/// ```
/// use the_textkit::observability::messages::processor::ProcessorExecutionStarted;
///
/// let msg = ProcessorExecutionStarted {
///     processor_id: "case_converter",
///     input_size: 1024,
/// };
///
/// assert!(msg.to_string().contains("case_converter"));
/// ```
pub struct ProcessorExecutionStarted<'a> {
    pub processor_id: &'a str,
    pub input_size: usize,
}

impl Display for ProcessorExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' execution started: input_size={} bytes",
            self.processor_id, self.input_size
        )
    }
}

impl StructuredLog for ProcessorExecutionStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            input_size = self.input_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_execution",
            span_name = name,
            processor_id = self.processor_id,
            input_size = self.input_size,
        )
    }
}

/// Processor execution completed successfully.
///
/// # Log Level
/// `debug!` - Per-request detail
pub struct ProcessorExecutionCompleted<'a> {
    pub processor_id: &'a str,
    pub input_size: usize,
    pub output_size: usize,
    pub duration: std::time::Duration,
}

impl Display for ProcessorExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' completed: input={} bytes, output={} bytes, duration={:?}",
            self.processor_id, self.input_size, self.output_size, self.duration
        )
    }
}

impl StructuredLog for ProcessorExecutionCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            input_size = self.input_size,
            output_size = self.output_size,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_completed",
            span_name = name,
            processor_id = self.processor_id,
            output_size = self.output_size,
        )
    }
}

/// Processor execution failed.
///
/// # Log Level
/// `warn!` - The request was rejected; the caller gets an error outcome
///
/// # Example
/// ```
/// use the_textkit::observability::messages::processor::ProcessorExecutionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad input");
/// let msg = ProcessorExecutionFailed {
///     processor_id: "codec",
///     error: &error,
/// };
///
/// assert_eq!(msg.to_string(), "Processor 'codec' execution failed: bad input");
/// ```
pub struct ProcessorExecutionFailed<'a> {
    pub processor_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' execution failed: {}",
            self.processor_id, self.error
        )
    }
}

impl StructuredLog for ProcessorExecutionFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            processor_id = self.processor_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_failed",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}

/// Processor instantiation failed.
///
/// # Log Level
/// `error!` - The pipeline cannot be built
pub struct ProcessorInstantiationFailed<'a> {
    pub processor_id: &'a str,
    pub impl_name: &'a str,
    pub reason: &'a str,
}

impl Display for ProcessorInstantiationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to instantiate processor '{}' with implementation '{}': {}",
            self.processor_id, self.impl_name, self.reason
        )
    }
}

impl StructuredLog for ProcessorInstantiationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            processor_id = self.processor_id,
            impl_name = self.impl_name,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_instantiation",
            span_name = name,
            processor_id = self.processor_id,
            impl_name = self.impl_name,
        )
    }
}
