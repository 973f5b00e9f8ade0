// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::keyword_density::{analyze_keywords, render_table, to_csv, KeywordOptions};
use crate::traits::{processor::ProcessorIntent, Processor};

const DEFAULT_TOP: usize = 5;

/// Shape of the downloadable keyword report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordExport {
    #[default]
    Csv,
    /// `word: N times (d.dd%)` lines.
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordDensityOptions {
    #[serde(flatten)]
    pub keywords: KeywordOptions,
    /// How many of the ranked keywords to report as metadata.
    pub top: usize,
    pub export: KeywordExport,
}

impl Default for KeywordDensityOptions {
    fn default() -> Self {
        Self {
            keywords: KeywordOptions::default(),
            top: DEFAULT_TOP,
            export: KeywordExport::Csv,
        }
    }
}

/// Keyword Density processor - ranks keywords, reported as metadata
pub struct KeywordDensityProcessor {
    options: KeywordDensityOptions,
}

impl KeywordDensityProcessor {
    pub fn new(options: KeywordDensityOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for KeywordDensityProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let report = analyze_keywords(input, &self.options.keywords);
            let mut run = ToolRun::analyzed()
                .with("total_words", report.total_words)
                .with("distinct_keywords", report.keywords.len());
            for (rank, stat) in report.keywords.iter().take(self.options.top).enumerate() {
                run = run.with(
                    &format!("keyword_{}", rank + 1),
                    format!("{}:{}:{:.2}", stat.word, stat.count, stat.density),
                );
            }
            Ok(run)
        })
    }

    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let report = analyze_keywords(input, &self.options.keywords);
        Ok(Some(match self.options.export {
            KeywordExport::Csv => Download::csv("keyword-analysis.csv", to_csv(&report)),
            KeywordExport::Table => Download::text("keyword-analysis.txt", render_table(&report)),
        }))
    }

    fn name(&self) -> &'static str {
        "keyword_density"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}
