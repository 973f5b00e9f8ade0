// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;

/// Whether a processor changes the text flowing through a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorIntent {
    /// Replaces the canonical payload with its output.
    Transform,
    /// Reads the payload and reports metadata; the canonical payload is left as is.
    Analyze,
}

#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse;

    /// Implementation name, as used in the `impl_` field of a pipeline config.
    fn name(&self) -> &'static str;

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Transform
    }

    /// The tool's downloadable rendering of `input`: a report, table or
    /// export document. `None` when the payload itself is the result.
    async fn export(&self, _input: &str) -> Result<Option<Download>, ProcessorError> {
        Ok(None)
    }
}
