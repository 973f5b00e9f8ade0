// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the chain executor lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_textkit::observability::messages::pipeline::PipelineStarted;
///
/// let msg = PipelineStarted {
///     processor_count: 3,
///     failure_strategy: "FailFast",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Starting pipeline: 3 processors, failure_strategy=FailFast"
/// );
/// ```
pub struct PipelineStarted<'a> {
    pub processor_count: usize,
    pub failure_strategy: &'a str,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pipeline: {} processors, failure_strategy={}",
            self.processor_count, self.failure_strategy
        )
    }
}

impl StructuredLog for PipelineStarted<'_> {
    fn log(&self) {
        tracing::info!(
            processor_count = self.processor_count,
            failure_strategy = self.failure_strategy,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline",
            span_name = name,
            processor_count = self.processor_count,
            failure_strategy = self.failure_strategy,
        )
    }
}

/// Pipeline execution completed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineCompleted {
    pub processor_count: usize,
    pub failure_count: usize,
    pub duration: std::time::Duration,
}

impl Display for PipelineCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline completed: {} processors, {} failures, duration={:?}",
            self.processor_count, self.failure_count, self.duration
        )
    }
}

impl StructuredLog for PipelineCompleted {
    fn log(&self) {
        tracing::info!(
            processor_count = self.processor_count,
            failure_count = self.failure_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_completed",
            span_name = name,
            processor_count = self.processor_count,
            duration = ?self.duration,
        )
    }
}

/// Pipeline stopped at a failing processor.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PipelineFailed<'a> {
    pub processor_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline stopped at processor '{}': {}",
            self.processor_id, self.error
        )
    }
}

impl StructuredLog for PipelineFailed<'_> {
    fn log(&self) {
        tracing::error!(
            processor_id = self.processor_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "pipeline_failed",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}

/// A processor failed and the pipeline carried on with the previous payload.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct ProcessorFailureTolerated<'a> {
    pub processor_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorFailureTolerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' failed, continuing with unchanged payload: {}",
            self.processor_id, self.error
        )
    }
}

impl StructuredLog for ProcessorFailureTolerated<'_> {
    fn log(&self) {
        tracing::warn!(
            processor_id = self.processor_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_failure_tolerated",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}
