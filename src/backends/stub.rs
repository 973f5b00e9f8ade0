// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::envelope::{PipelineMetadata, ProcessorRequest, ProcessorResponse};
use crate::traits::{processor::ProcessorIntent, Processor};

/// Appends a fixed marker to the payload; used to observe ordering in pipeline tests
pub struct StubProcessor {
    pub marker: String,
}

impl StubProcessor {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Processor for StubProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let mut payload = req.payload;
        payload.extend_from_slice(self.marker.as_bytes());
        ProcessorResponse::next_payload(payload, None)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Reports the payload length as metadata and hands back a payload that must be ignored
pub struct InspectorProcessor;

#[async_trait::async_trait]
impl Processor for InspectorProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let metadata = PipelineMetadata::for_processor(
            self.name(),
            [("seen_bytes", req.payload.len().to_string())],
        );
        ProcessorResponse::next_payload(b"inspector output".to_vec(), Some(metadata))
    }

    fn name(&self) -> &'static str {
        "inspector"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}

/// A processor that always fails for testing failure scenarios
pub struct FailingProcessor;

#[async_trait::async_trait]
impl Processor for FailingProcessor {
    async fn process(&self, _req: ProcessorRequest) -> ProcessorResponse {
        ProcessorResponse::error(500, "Simulated processor failure")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A processor that returns no outcome for testing invalid response scenarios
pub struct NoOutcomeProcessor;

#[async_trait::async_trait]
impl Processor for NoOutcomeProcessor {
    async fn process(&self, _req: ProcessorRequest) -> ProcessorResponse {
        ProcessorResponse {
            outcome: None,
            metadata: None,
        }
    }

    fn name(&self) -> &'static str {
        "no_outcome"
    }
}
