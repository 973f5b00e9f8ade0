// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::ProcessorMap;
use crate::envelope::{PipelineMetadata, ProcessorRequest, ProcessorResponse};
use crate::errors::{ExecutionError, FailureStrategy};
use indexmap::IndexMap;

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Canonical payload after the last Transform processor that succeeded.
    pub payload: Vec<u8>,
    /// Responses in execution order, keyed by processor id.
    pub responses: IndexMap<String, ProcessorResponse>,
    pub metadata: PipelineMetadata,
    /// Failures tolerated under `ContinueOnError`, in execution order.
    pub failures: Vec<ExecutionError>,
}

impl PipelineOutput {
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    /// Run every processor in `processors` against `input` using the default
    /// failure strategy.
    async fn execute(
        &self,
        processors: ProcessorMap,
        input: ProcessorRequest,
    ) -> Result<PipelineOutput, ExecutionError> {
        self.execute_with_strategy(processors, input, FailureStrategy::default())
            .await
    }

    async fn execute_with_strategy(
        &self,
        processors: ProcessorMap,
        input: ProcessorRequest,
        failure_strategy: FailureStrategy,
    ) -> Result<PipelineOutput, ExecutionError>;
}
