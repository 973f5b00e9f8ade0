// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HORIZONTAL_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("Invalid regex"));
static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n").expect("Invalid regex"));
static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?-]").expect("Invalid regex"));

/// Toggles for [`clean_text`]. Steps always apply in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    pub trim_lines: bool,
    pub remove_extra_spaces: bool,
    pub remove_extra_lines: bool,
    pub remove_special_chars: bool,
    pub normalize_quotes: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            trim_lines: true,
            remove_extra_spaces: true,
            remove_extra_lines: true,
            remove_special_chars: false,
            normalize_quotes: false,
        }
    }
}

/// Normalize whitespace, punctuation and quotes, then trim the whole result.
///
/// Special-character removal runs before quote normalization, so curly quotes
/// are dropped rather than straightened when both are enabled.
pub fn clean_text(text: &str, options: &CleaningOptions) -> String {
    let mut cleaned = text.to_string();

    if options.trim_lines {
        cleaned = cleaned.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    }
    if options.remove_extra_spaces {
        cleaned = HORIZONTAL_WHITESPACE.replace_all(&cleaned, " ").into_owned();
    }
    if options.remove_extra_lines {
        cleaned = BLANK_LINE_RUN.replace_all(&cleaned, "\n\n").into_owned();
    }
    if options.remove_special_chars {
        cleaned = SPECIAL_CHARS.replace_all(&cleaned, "").into_owned();
    }
    if options.normalize_quotes {
        cleaned = cleaned
            .replace(['\u{2018}', '\u{2019}'], "'")
            .replace(['\u{201C}', '\u{201D}'], "\"");
    }

    cleaned.trim().to_string()
}
