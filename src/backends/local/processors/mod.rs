// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One processor per text tool.
//!
//! Every processor decodes the payload as UTF-8, runs its tool and answers with
//! either a new payload (Transform) or the unchanged input plus metadata
//! (Analyze). Execution is logged through the processor messages.

pub mod case_converter;
pub mod codec;
pub mod email_extractor;
pub mod json_formatter;
pub mod keyword_density;
pub mod lorem;
pub mod numeric;
pub mod password;
pub mod permalink;
pub mod slug;
pub mod speech;
pub mod text_cleaner;
pub mod text_diff;
pub mod text_stats;

pub use case_converter::CaseConverterProcessor;
pub use codec::CodecProcessor;
pub use email_extractor::EmailExtractorProcessor;
pub use json_formatter::JsonFormatterProcessor;
pub use keyword_density::KeywordDensityProcessor;
pub use lorem::LoremProcessor;
pub use numeric::NumericProcessor;
pub use password::PasswordProcessor;
pub use permalink::PermalinkProcessor;
pub use slug::SlugProcessor;
pub use speech::SpeechProcessor;
pub use text_cleaner::TextCleanerProcessor;
pub use text_diff::TextDiffProcessor;
pub use text_stats::TextStatsProcessor;

use std::time::{Duration, Instant};

use crate::envelope::{PipelineMetadata, ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::observability::messages::processor::{
    ProcessorExecutionCompleted, ProcessorExecutionFailed, ProcessorExecutionStarted,
};
use crate::observability::messages::StructuredLog;

/// Result of one tool invocation inside a processor.
#[derive(Debug, Default)]
pub(crate) struct ToolRun {
    /// Replacement payload. `None` passes the input through unchanged.
    pub payload: Option<String>,
    pub metadata: Vec<(String, String)>,
}

impl ToolRun {
    pub fn transformed(payload: String) -> Self {
        Self {
            payload: Some(payload),
            metadata: Vec::new(),
        }
    }

    pub fn analyzed() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }
}

/// Run a synchronous tool with the standard processor logging and envelope
/// handling.
pub(crate) fn run_tool<F>(name: &'static str, req: ProcessorRequest, tool: F) -> ProcessorResponse
where
    F: FnOnce(&str) -> Result<ToolRun, ProcessorError>,
{
    let start_msg = ProcessorExecutionStarted {
        processor_id: name,
        input_size: req.payload.len(),
    };
    let span = start_msg.span("processor_execution");
    let _guard = span.enter();
    start_msg.log();

    let start_time = Instant::now();
    let result = String::from_utf8(req.payload)
        .map_err(ProcessorError::from)
        .and_then(|input| tool(&input).map(|run| (input, run)));

    respond(name, start_msg.input_size, start_time.elapsed(), result)
}

/// Turn a tool result into a response, logging completion or failure.
pub(crate) fn respond(
    name: &'static str,
    input_size: usize,
    duration: Duration,
    result: Result<(String, ToolRun), ProcessorError>,
) -> ProcessorResponse {
    match result {
        Ok((input, run)) => {
            let payload = run.payload.unwrap_or(input).into_bytes();
            ProcessorExecutionCompleted {
                processor_id: name,
                input_size,
                output_size: payload.len(),
                duration,
            }
            .log();

            let metadata = (!run.metadata.is_empty())
                .then(|| PipelineMetadata::for_processor(name, run.metadata));
            ProcessorResponse::next_payload(payload, metadata)
        }
        Err(error) => {
            ProcessorExecutionFailed {
                processor_id: name,
                error: &error,
            }
            .log();
            ProcessorResponse::error(error.code(), error.to_string())
        }
    }
}
