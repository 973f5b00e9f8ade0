// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::{DateTime, Local};

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::numeric::{convert, render_report, report_filename, NumericOptions};
use crate::traits::Processor;

/// Numeric processor - text to binary, hex, octal or decimal code points
pub struct NumericProcessor {
    options: NumericOptions,
    clock: fn() -> DateTime<Local>,
}

impl NumericProcessor {
    pub fn new(options: NumericOptions) -> Self {
        Self {
            options,
            clock: Local::now,
        }
    }

    /// Use a fixed clock for the report timestamp.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl Processor for NumericProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let result = convert(input, &self.options);
            Ok(ToolRun::transformed(result.output(self.options.format))
                .with("characters", result.character_breakdown.len()))
        })
    }

    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let now = (self.clock)();
        let result = convert(input, &self.options);
        let report = render_report(input, &self.options, &result, &now);
        Ok(Some(Download::text(report_filename(&now), report)))
    }

    fn name(&self) -> &'static str {
        "numeric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::numeric::{BinaryFormat, OutputFormat, Spacing};

    #[tokio::test]
    async fn test_formats() {
        let cases = vec![
            (NumericOptions::default(), "Hi", "01001000 01101001"),
            (
                NumericOptions {
                    format: OutputFormat::Hex,
                    spacing: Spacing::None,
                    ..NumericOptions::default()
                },
                "Hi",
                "0x4869",
            ),
            (
                NumericOptions {
                    binary_format: BinaryFormat::SevenBit,
                    spacing: Spacing::Comma,
                    ..NumericOptions::default()
                },
                "AB",
                "1000001, 1000010",
            ),
            (
                NumericOptions {
                    format: OutputFormat::Decimal,
                    ..NumericOptions::default()
                },
                "A",
                "65",
            ),
        ];

        for (options, input, expected) in cases {
            let response = NumericProcessor::new(options)
                .process(ProcessorRequest::from_text(input))
                .await;
            assert_eq!(response.payload_text(), Some(expected), "{:?}", options);
        }
    }

    #[tokio::test]
    async fn test_export_is_conversion_report() {
        use chrono::TimeZone;

        let download = NumericProcessor::new(NumericOptions::default())
            .with_clock(|| Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap())
            .export("Hi")
            .await
            .unwrap()
            .expect("numeric export");
        assert!(download.filename.starts_with("text-conversion-"));
        assert!(download.filename.ends_with(".txt"));
        assert!(download.content.starts_with("Text to Binary/Hex Conversion Results"));
        assert!(download.content.contains("Original Text: \"Hi\""));
        assert!(download.content.ends_with("Generated on: 2024-03-09 12:00:00"));
    }
}
