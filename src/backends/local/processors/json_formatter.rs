// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::json_formatter::{format_json, JsonFormatOptions};
use crate::traits::Processor;

/// JSON Formatter processor - pretty-prints or minifies JSON, rejects invalid input
pub struct JsonFormatterProcessor {
    options: JsonFormatOptions,
}

impl JsonFormatterProcessor {
    pub fn new(options: JsonFormatOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for JsonFormatterProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let report = format_json(input, &self.options);
            if !report.is_valid {
                let message = report
                    .error_message
                    .unwrap_or_else(|| "Invalid JSON".to_string());
                return Err(ProcessorError::Rejected(message));
            }

            let mut run = ToolRun::transformed(report.output)
                .with("processing_time_us", report.processing_time.as_micros());
            if let Some(warning) = report.warning {
                run = run.with("warning", warning);
            }
            Ok(run)
        })
    }

    fn name(&self) -> &'static str {
        "json_formatter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Outcome;

    #[tokio::test]
    async fn test_minify() {
        let processor = JsonFormatterProcessor::new(JsonFormatOptions {
            minify: true,
            ..JsonFormatOptions::default()
        });
        let response = processor
            .process(ProcessorRequest::from_text("{ \"b\": 1,\n \"a\": [1, 2] }"))
            .await;
        assert_eq!(response.payload_text(), Some(r#"{"b":1,"a":[1,2]}"#));
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let processor = JsonFormatterProcessor::new(JsonFormatOptions::default());
        let response = processor.process(ProcessorRequest::from_text("{oops")).await;
        match response.outcome {
            Some(Outcome::Error(detail)) => {
                assert_eq!(detail.code, 400);
                assert!(!detail.message.is_empty());
            }
            other => panic!("Expected error outcome, got {:?}", other),
        }
    }
}
