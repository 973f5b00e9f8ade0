// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::tools::text_cleaner::{clean_text, CleaningOptions};
use crate::traits::Processor;

pub struct TextCleanerProcessor {
    options: CleaningOptions,
}

impl TextCleanerProcessor {
    pub fn new(options: CleaningOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for TextCleanerProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            Ok(ToolRun::transformed(clean_text(input, &self.options)))
        })
    }

    fn name(&self) -> &'static str {
        "text_cleaner"
    }
}
