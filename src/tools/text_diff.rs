// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Positional line diff.
//!
//! Line *i* of the first text is compared with line *i* of the second; there is
//! no line matching, so an inserted line shifts every following comparison.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Unchanged,
}

impl DiffKind {
    fn prefix(self) -> &'static str {
        match self {
            DiffKind::Added => "+ ",
            DiffKind::Removed => "- ",
            DiffKind::Unchanged => "  ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    /// The original, unprocessed line.
    pub text: String,
    /// 1-based position shared by a removed/added pair.
    pub line_number: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    pub ignore_whitespace: bool,
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

fn comparable(line: &str, options: &DiffOptions) -> String {
    let line = if options.ignore_whitespace { line.trim() } else { line };
    if options.ignore_case {
        line.to_lowercase()
    } else {
        line.to_string()
    }
}

pub fn diff_lines(first: &str, second: &str, options: &DiffOptions) -> Vec<DiffLine> {
    let first_lines: Vec<&str> = first.split('\n').collect();
    let second_lines: Vec<&str> = second.split('\n').collect();
    let line_count = first_lines.len().max(second_lines.len());

    let mut result = Vec::with_capacity(line_count);
    for index in 0..line_count {
        let original_first = first_lines.get(index).copied().unwrap_or("");
        let original_second = second_lines.get(index).copied().unwrap_or("");
        let compared_first = comparable(original_first, options);
        let compared_second = comparable(original_second, options);
        let line_number = index + 1;

        if compared_first == compared_second {
            result.push(DiffLine {
                kind: DiffKind::Unchanged,
                text: original_first.to_string(),
                line_number,
            });
            continue;
        }
        if !compared_first.is_empty() {
            result.push(DiffLine {
                kind: DiffKind::Removed,
                text: original_first.to_string(),
                line_number,
            });
        }
        if !compared_second.is_empty() {
            result.push(DiffLine {
                kind: DiffKind::Added,
                text: original_second.to_string(),
                line_number,
            });
        }
    }
    result
}

/// Unified-style text: `+ `, `- ` or two spaces before each line.
pub fn render_diff(lines: &[DiffLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}", line.kind.prefix(), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn summarize(lines: &[DiffLine]) -> DiffSummary {
    lines.iter().fold(DiffSummary::default(), |mut summary, line| {
        match line.kind {
            DiffKind::Added => summary.added += 1,
            DiffKind::Removed => summary.removed += 1,
            DiffKind::Unchanged => summary.unchanged += 1,
        }
        summary
    })
}
