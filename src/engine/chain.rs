// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential chain executor with a canonical payload.
//!
//! Processors run one at a time in the order of the [`ProcessorMap`]. A single
//! canonical payload flows through the chain:
//!
//! - **Transform processors** replace the canonical payload with their output
//! - **Analyze processors** receive the canonical payload and only contribute
//!   metadata; whatever payload they hand back is ignored
//!
//! Every processor sees the metadata accumulated by the processors before it.
//! Entries a processor reports under its implementation name are filed under
//! its configured ID, so two instances of one tool do not overwrite each other.
//!
//! # Failure handling
//!
//! - [`FailureStrategy::FailFast`]: the first error outcome stops the chain
//! - [`FailureStrategy::ContinueOnError`]: the failure is recorded, the
//!   canonical payload is left unchanged, and the next processor runs
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use the_textkit::backends::local::{CaseConverterProcessor, TextStatsProcessor};
//! use the_textkit::backends::local::case_converter::CaseConverterOptions;
//! use the_textkit::config::ProcessorMap;
//! use the_textkit::engine::ChainExecutor;
//! use the_textkit::envelope::ProcessorRequest;
//! use the_textkit::tools::case_converter::CaseMode;
//! use the_textkit::traits::PipelineExecutor;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut processors = ProcessorMap::new();
//! processors.insert(
//!     "shout".to_string(),
//!     Arc::new(CaseConverterProcessor::new(CaseConverterOptions { mode: CaseMode::Upper })),
//! );
//! processors.insert("stats".to_string(), Arc::new(TextStatsProcessor::new()));
//!
//! let output = ChainExecutor::new()
//!     .execute(processors, ProcessorRequest::from_text("hello world"))
//!     .await?;
//!
//! assert_eq!(output.payload_text(), "HELLO WORLD");
//! assert_eq!(output.metadata.get_metadata_value("stats", "words"), Some("2"));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use indexmap::IndexMap;
use std::time::Instant;
use tracing::Instrument;

use crate::config::ProcessorMap;
use crate::envelope::{Outcome, ProcessorRequest};
use crate::errors::{ExecutionError, FailureStrategy};
use crate::observability::messages::pipeline::{
    PipelineCompleted, PipelineFailed, PipelineStarted, ProcessorFailureTolerated,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{PipelineExecutor, PipelineOutput, ProcessorIntent};

/// Runs processors one after another in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainExecutor;

impl ChainExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineExecutor for ChainExecutor {
    async fn execute_with_strategy(
        &self,
        processors: ProcessorMap,
        input: ProcessorRequest,
        failure_strategy: FailureStrategy,
    ) -> Result<PipelineOutput, ExecutionError> {
        if processors.is_empty() {
            return Err(ExecutionError::EmptyPipeline);
        }

        let strategy_name = format!("{:?}", failure_strategy);
        let start_msg = PipelineStarted {
            processor_count: processors.len(),
            failure_strategy: &strategy_name,
        };
        let span = start_msg.span("pipeline_execution");
        start_msg.log();

        run_chain(processors, input, failure_strategy)
            .instrument(span)
            .await
    }
}

async fn run_chain(
    processors: ProcessorMap,
    input: ProcessorRequest,
    failure_strategy: FailureStrategy,
) -> Result<PipelineOutput, ExecutionError> {
    let start_time = Instant::now();
    let mut payload = input.payload;
    let mut metadata = input.metadata.unwrap_or_default();
    let mut responses = IndexMap::new();
    let mut failures = Vec::new();

    for (id, processor) in processors.iter() {
        let request = ProcessorRequest {
            payload: payload.clone(),
            metadata: Some(metadata.clone()),
        };
        let response = processor.process(request).await;
        metadata.merge_processor_response(id, processor.name(), &response);

        let failure = match &response.outcome {
            Some(Outcome::NextPayload(next)) => {
                if processor.declared_intent() == ProcessorIntent::Transform {
                    payload = next.clone();
                }
                None
            }
            Some(Outcome::Error(detail)) => Some(ExecutionError::ProcessorFailed {
                processor_id: id.clone(),
                error: detail.message.clone(),
            }),
            None => Some(ExecutionError::NoOutcome {
                processor_id: id.clone(),
            }),
        };
        responses.insert(id.clone(), response);

        let Some(error) = failure else {
            continue;
        };
        match failure_strategy {
            FailureStrategy::FailFast => {
                PipelineFailed {
                    processor_id: id,
                    error: &error,
                }
                .log();
                return Err(error);
            }
            FailureStrategy::ContinueOnError => {
                ProcessorFailureTolerated {
                    processor_id: id,
                    error: &error,
                }
                .log();
                failures.push(error);
            }
        }
    }

    if failures.len() == processors.len() {
        let error = if failures.len() == 1 {
            failures.remove(0)
        } else {
            ExecutionError::MultipleFailed { errors: failures }
        };
        PipelineFailed {
            processor_id: "",
            error: &error,
        }
        .log();
        return Err(error);
    }

    PipelineCompleted {
        processor_count: processors.len(),
        failure_count: failures.len(),
        duration: start_time.elapsed(),
    }
    .log();

    Ok(PipelineOutput {
        payload,
        responses,
        metadata,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FailingProcessor, InspectorProcessor, NoOutcomeProcessor, StubProcessor};
    use crate::envelope::PipelineMetadata;
    use crate::traits::Processor;
    use std::sync::Arc;

    fn stub(marker: &str) -> Arc<dyn Processor> {
        Arc::new(StubProcessor::new(marker))
    }

    fn inspector() -> Arc<dyn Processor> {
        Arc::new(InspectorProcessor)
    }

    fn failing() -> Arc<dyn Processor> {
        Arc::new(FailingProcessor)
    }

    fn silent() -> Arc<dyn Processor> {
        Arc::new(NoOutcomeProcessor)
    }

    fn chain(processors: Vec<(&str, Arc<dyn Processor>)>) -> ProcessorMap {
        let mut map = ProcessorMap::new();
        for (id, processor) in processors {
            map.insert(id.to_string(), processor);
        }
        map
    }

    #[tokio::test]
    async fn test_transforms_run_in_declaration_order() {
        let processors = chain(vec![
            ("first", stub("-a")),
            ("second", stub("-b")),
            ("third", stub("-c")),
        ]);

        let output = ChainExecutor::new()
            .execute(processors, ProcessorRequest::from_text("x"))
            .await
            .unwrap();

        assert_eq!(output.payload_text(), "x-a-b-c");
        let ids: Vec<&str> = output.responses.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert!(output.failures.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_output_does_not_replace_payload() {
        let processors = chain(vec![
            ("stub", stub("!")),
            ("inspector", inspector()),
            ("after", stub("?")),
        ]);

        let output = ChainExecutor::new()
            .execute(processors, ProcessorRequest::from_text("hi"))
            .await
            .unwrap();

        assert_eq!(output.payload_text(), "hi!?");
        assert_eq!(output.metadata.get_metadata_value("inspector", "seen_bytes"), Some("3"));
    }

    #[tokio::test]
    async fn test_input_metadata_is_carried() {
        let input = ProcessorRequest {
            payload: b"x".to_vec(),
            metadata: Some(PipelineMetadata::for_processor("caller", [("source", "cli")])),
        };
        let output = ChainExecutor::new()
            .execute(chain(vec![("inspector", inspector())]), input)
            .await
            .unwrap();

        assert_eq!(output.metadata.get_metadata_value("caller", "source"), Some("cli"));
        assert_eq!(output.metadata.list_processors(), vec!["caller", "inspector"]);
    }

    #[tokio::test]
    async fn test_failure_strategies() {
        let build = || {
            chain(vec![
                ("a", stub("-a")),
                ("broken", failing()),
                ("silent", silent()),
                ("c", stub("-c")),
            ])
        };

        let fail_fast = ChainExecutor::new()
            .execute_with_strategy(build(), ProcessorRequest::from_text("x"), FailureStrategy::FailFast)
            .await;
        assert_eq!(
            fail_fast.unwrap_err(),
            ExecutionError::ProcessorFailed {
                processor_id: "broken".to_string(),
                error: "Simulated processor failure".to_string(),
            }
        );

        let tolerant = ChainExecutor::new()
            .execute_with_strategy(
                build(),
                ProcessorRequest::from_text("x"),
                FailureStrategy::ContinueOnError,
            )
            .await
            .unwrap();
        assert_eq!(tolerant.payload_text(), "x-a-c");
        assert_eq!(
            tolerant.failures,
            vec![
                ExecutionError::ProcessorFailed {
                    processor_id: "broken".to_string(),
                    error: "Simulated processor failure".to_string(),
                },
                ExecutionError::NoOutcome {
                    processor_id: "silent".to_string(),
                },
            ]
        );
        assert_eq!(tolerant.responses.len(), 4);
    }

    #[tokio::test]
    async fn test_everything_failing_is_an_error() {
        let single = ChainExecutor::new()
            .execute_with_strategy(
                chain(vec![("broken", failing())]),
                ProcessorRequest::default(),
                FailureStrategy::ContinueOnError,
            )
            .await;
        assert!(matches!(single, Err(ExecutionError::ProcessorFailed { .. })));

        let several = ChainExecutor::new()
            .execute_with_strategy(
                chain(vec![
                    ("one", failing()),
                    ("two", silent()),
                ]),
                ProcessorRequest::default(),
                FailureStrategy::ContinueOnError,
            )
            .await;
        match several {
            Err(ExecutionError::MultipleFailed { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("Expected MultipleFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_pipeline() {
        let result = ChainExecutor::new()
            .execute(ProcessorMap::new(), ProcessorRequest::default())
            .await;
        assert_eq!(result.unwrap_err(), ExecutionError::EmptyPipeline);
    }
}
