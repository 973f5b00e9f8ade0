// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::tools::case_converter::{convert_case, CaseMode};
use crate::traits::{processor::ProcessorIntent, Processor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConverterOptions {
    pub mode: CaseMode,
}

/// Case Converter processor - rewrites the text in the configured case
pub struct CaseConverterProcessor {
    mode: CaseMode,
}

impl CaseConverterProcessor {
    pub fn new(options: CaseConverterOptions) -> Self {
        Self { mode: options.mode }
    }
}

#[async_trait]
impl Processor for CaseConverterProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            Ok(ToolRun::transformed(convert_case(input, self.mode)))
        })
    }

    fn name(&self) -> &'static str {
        "case_converter"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Transform
    }
}
