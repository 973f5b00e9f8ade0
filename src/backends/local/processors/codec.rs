// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::tools::codec::{soft_fail_output, transcode, Direction, Scheme};
use crate::traits::Processor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub scheme: Scheme,
    pub direction: Direction,
    /// Replace a failed conversion with a fixed placeholder instead of erroring.
    pub soft_fail: bool,
}

/// Codec processor - base64, URL or HTML-entity encoding and decoding
pub struct CodecProcessor {
    options: CodecOptions,
}

impl CodecProcessor {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for CodecProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let CodecOptions {
            scheme,
            direction,
            soft_fail,
        } = self.options;
        run_tool(self.name(), req, |input| {
            let result = transcode(input, scheme, direction);
            let failed = result.is_err();
            let output = if soft_fail {
                soft_fail_output(result, direction)
            } else {
                result?
            };
            let run = ToolRun::transformed(output)
                .with("scheme", scheme)
                .with("direction", direction.as_str());
            Ok(if failed { run.with("failed", true) } else { run })
        })
    }

    fn name(&self) -> &'static str {
        "codec"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Outcome;

    fn codec(scheme: Scheme, direction: Direction) -> CodecProcessor {
        CodecProcessor::new(CodecOptions {
            scheme,
            direction,
            soft_fail: false,
        })
    }

    #[tokio::test]
    async fn test_transcoding() {
        let cases = vec![
            (Scheme::Base64, Direction::Encode, "hello", "aGVsbG8="),
            (Scheme::Base64, Direction::Decode, "aGVs\nbG8", "hello"),
            (Scheme::Url, Direction::Encode, "a b", "a%20b"),
            (Scheme::Html, Direction::Decode, "&amp;lt;", "&lt;"),
            (Scheme::Url, Direction::Decode, "   ", ""),
        ];

        for (scheme, direction, input, expected) in cases {
            let response = codec(scheme, direction)
                .process(ProcessorRequest::from_text(input))
                .await;
            assert_eq!(response.payload_text(), Some(expected), "{} {:?}", scheme, input);
        }
    }

    #[tokio::test]
    async fn test_malformed_input_is_rejected() {
        let response = codec(Scheme::Url, Direction::Decode)
            .process(ProcessorRequest::from_text("100%"))
            .await;
        match response.outcome {
            Some(Outcome::Error(detail)) => {
                assert_eq!(detail.code, 400);
                assert_eq!(detail.message, "Malformed percent escape at byte 3");
            }
            other => panic!("Expected error outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_soft_fail_yields_placeholder() {
        let cases = vec![
            (Scheme::Url, Direction::Decode, "100%", "Error decoding text"),
            (Scheme::Base64, Direction::Decode, "!!!", "Error decoding text"),
        ];

        for (scheme, direction, input, expected) in cases {
            let response = CodecProcessor::new(CodecOptions {
                scheme,
                direction,
                soft_fail: true,
            })
            .process(ProcessorRequest::from_text(input))
            .await;
            assert_eq!(response.payload_text(), Some(expected), "{} {:?}", scheme, input);
            let metadata = response.metadata.expect("metadata");
            assert_eq!(metadata.get_metadata_value("codec", "failed"), Some("true"));
        }
    }

    #[test]
    fn test_soft_fail_defaults_off() {
        let options: CodecOptions = serde_yaml::from_str("scheme: url").unwrap();
        assert!(!options.soft_fail);
    }
}
