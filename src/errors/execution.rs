// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use thiserror::Error;

/// How the pipeline reacts when a processor fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Stop at the first failing processor and report it.
    #[default]
    FailFast,
    /// Record the failure, keep the canonical payload unchanged and run the remaining processors.
    ContinueOnError,
}

/// Errors produced while executing a pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// A processor returned an error outcome.
    #[error("Processor '{processor_id}' failed: {error}")]
    ProcessorFailed { processor_id: String, error: String },

    /// A processor returned a response without any outcome.
    #[error("Processor '{processor_id}' returned no outcome")]
    NoOutcome { processor_id: String },

    /// Several processors failed under `ContinueOnError` and nothing succeeded.
    #[error("{} processors failed", .errors.len())]
    MultipleFailed { errors: Vec<ExecutionError> },

    /// The executor was handed an empty processor map.
    #[error("Pipeline has no processors to execute")]
    EmptyPipeline,
}
