// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Keyword frequency and density.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("Invalid regex"));

pub const MAX_KEYWORDS: usize = 50;

const COMMON_WORDS: [&str; 40] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordOptions {
    pub min_word_length: usize,
    pub exclude_common_words: bool,
    pub case_sensitive: bool,
    pub include_numbers: bool,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            exclude_common_words: true,
            case_sensitive: false,
            include_numbers: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordStat {
    pub word: String,
    pub count: usize,
    /// Percentage of all tokens, including filtered ones.
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordReport {
    pub total_words: usize,
    pub keywords: Vec<KeywordStat>,
}

pub fn analyze_keywords(text: &str, options: &KeywordOptions) -> KeywordReport {
    let tokens: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    let total_words = tokens.len();

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for token in tokens {
        let word = if options.case_sensitive {
            token.to_string()
        } else {
            token.to_lowercase()
        };
        if word.chars().count() < options.min_word_length {
            continue;
        }
        if !options.include_numbers && word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if options.exclude_common_words && COMMON_WORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut keywords: Vec<KeywordStat> = counts
        .into_iter()
        .map(|(word, count)| KeywordStat {
            word,
            count,
            density: count as f64 / total_words as f64 * 100.0,
        })
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count));
    keywords.truncate(MAX_KEYWORDS);

    KeywordReport {
        total_words,
        keywords,
    }
}

/// `word: N times (d.dd%)`, one keyword per line.
pub fn render_table(report: &KeywordReport) -> String {
    report
        .keywords
        .iter()
        .map(|k| format!("{}: {} times ({:.2}%)", k.word, k.count, k.density))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn to_csv(report: &KeywordReport) -> String {
    let mut rows = vec!["Keyword,Count,Density (%),Total Words".to_string()];
    rows.extend(report.keywords.iter().map(|k| {
        format!("{},{},{:.2},{}", k.word, k.count, k.density, report.total_words)
    }));
    rows.join("\n")
}
