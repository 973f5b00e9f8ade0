// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::text_diff::{diff_lines, render_diff, summarize, DiffOptions};
use crate::traits::{processor::ProcessorIntent, Processor};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDiffOptions {
    /// The second text; the payload is the first.
    pub compare_with: String,
    #[serde(flatten)]
    pub diff: DiffOptions,
}

/// Text Diff processor - compares the payload against a configured text
pub struct TextDiffProcessor {
    options: TextDiffOptions,
}

impl TextDiffProcessor {
    pub fn new(options: TextDiffOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for TextDiffProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let lines = diff_lines(input, &self.options.compare_with, &self.options.diff);
            let summary = summarize(&lines);
            Ok(ToolRun::analyzed()
                .with("added", summary.added)
                .with("removed", summary.removed)
                .with("unchanged", summary.unchanged)
                .with("has_changes", summary.has_changes())
                .with("diff", render_diff(&lines)))
        })
    }

    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let lines = diff_lines(input, &self.options.compare_with, &self.options.diff);
        Ok(Some(Download::text("text-diff.txt", render_diff(&lines))))
    }

    fn name(&self) -> &'static str {
        "text_diff"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_diff_summary_metadata() {
        let processor = TextDiffProcessor::new(TextDiffOptions {
            compare_with: "one\nTWO\nthree".to_string(),
            diff: DiffOptions::default(),
        });
        let response = processor
            .process(ProcessorRequest::from_text("one\ntwo\nthree"))
            .await;

        assert_eq!(response.payload_text(), Some("one\ntwo\nthree"));
        let metadata = response.metadata.expect("metadata");
        assert_eq!(metadata.get_metadata_value("text_diff", "added"), Some("1"));
        assert_eq!(metadata.get_metadata_value("text_diff", "removed"), Some("1"));
        assert_eq!(metadata.get_metadata_value("text_diff", "unchanged"), Some("2"));
        assert_eq!(metadata.get_metadata_value("text_diff", "has_changes"), Some("true"));
    }

    #[test]
    fn test_options_flatten_diff_toggles() {
        let options: TextDiffOptions =
            serde_yaml::from_str("compare_with: ONE\nignore_case: true").unwrap();
        assert!(options.diff.ignore_case);
        assert!(!options.diff.ignore_whitespace);
        assert_eq!(options.compare_with, "ONE");
    }

    #[tokio::test]
    async fn test_export_renders_marked_lines() {
        let download = TextDiffProcessor::new(TextDiffOptions {
            compare_with: "one\nTWO".to_string(),
            diff: DiffOptions::default(),
        })
        .export("one\ntwo")
        .await
        .unwrap()
        .expect("diff export");
        assert_eq!(download.filename, "text-diff.txt");
        let lines: Vec<&str> = download.content.lines().collect();
        assert!(lines.contains(&"  one"));
        assert!(lines.contains(&"- two"));
        assert!(lines.contains(&"+ TWO"));
    }
}
