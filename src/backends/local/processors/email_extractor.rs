// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::email_extractor::{extract, to_csv, ExtractorOptions};
use crate::traits::Processor;

/// Email Extractor processor - replaces the text with the addresses found in it
pub struct EmailExtractorProcessor {
    options: ExtractorOptions,
}

impl EmailExtractorProcessor {
    pub fn new(options: ExtractorOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for EmailExtractorProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let extraction = extract(input, &self.options);
            let stats = extraction.stats;
            Ok(ToolRun::transformed(extraction.output_text())
                .with("total", stats.total)
                .with("valid", stats.valid)
                .with("invalid", stats.invalid)
                .with("duplicates", stats.duplicates))
        })
    }

    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let extraction = extract(input, &self.options);
        Ok(Some(Download::csv("extracted_emails.csv", to_csv(&extraction.emails))))
    }

    fn name(&self) -> &'static str {
        "email_extractor"
    }
}
