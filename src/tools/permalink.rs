// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Permalink generation with several strategies, SEO scoring and validation.
//!
//! Generation is deterministic given the injected clock and random source, which
//! only the `uuid`, `timestamp` and `custom` strategies consult.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::ToolError;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));
static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\-.]").expect("Invalid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));
static URL_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\-_]").expect("Invalid regex"));

const RANDOM_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const STOP_WORDS: [&str; 55] = [
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "would", "you", "your",
    "this", "these", "they", "them", "their", "there", "then", "than", "but", "or", "so", "if",
    "when", "where", "why", "how", "what", "who", "which", "can", "could", "should", "may",
    "might", "must", "shall", "will", "would",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkStrategy {
    Seo,
    Uuid,
    Hash,
    Timestamp,
    Custom,
    #[default]
    Smart,
}

impl PermalinkStrategy {
    /// Order in which [`generate_variations`] lists the strategies.
    pub const ALL: [PermalinkStrategy; 6] = [
        PermalinkStrategy::Smart,
        PermalinkStrategy::Seo,
        PermalinkStrategy::Uuid,
        PermalinkStrategy::Hash,
        PermalinkStrategy::Timestamp,
        PermalinkStrategy::Custom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PermalinkStrategy::Smart => "Smart SEO",
            PermalinkStrategy::Seo => "SEO Optimized",
            PermalinkStrategy::Uuid => "UUID Based",
            PermalinkStrategy::Hash => "Hash Based",
            PermalinkStrategy::Timestamp => "Timestamp",
            PermalinkStrategy::Custom => "Custom Pattern",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    #[default]
    Hyphen,
    Underscore,
    Dot,
    None,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Hyphen => "-",
            Separator::Underscore => "_",
            Separator::Dot => ".",
            Separator::None => "",
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "-" => Ok(Separator::Hyphen),
            "_" => Ok(Separator::Underscore),
            "." => Ok(Separator::Dot),
            "" => Ok(Separator::None),
            _ => Err(ToolError::InvalidChoice {
                name: "separator",
                value,
            }),
        }
    }
}

impl From<Separator> for String {
    fn from(separator: Separator) -> Self {
        separator.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
    #[serde(rename = "YYYY/MM/DD")]
    YearMonthDaySlashed,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
}

impl DateFormat {
    pub fn format(self, date: &DateTime<Local>) -> String {
        let pattern = match self {
            DateFormat::YearMonthDay => "%Y-%m-%d",
            DateFormat::YearMonthDaySlashed => "%Y/%m/%d",
            DateFormat::MonthDayYear => "%m-%d-%Y",
            DateFormat::DayMonthYear => "%d-%m-%Y",
        };
        date.format(pattern).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkOptions {
    pub strategy: PermalinkStrategy,
    pub separator: Separator,
    pub max_length: usize,
    pub preserve_case: bool,
    pub remove_stop_words: bool,
    pub prefix: String,
    pub suffix: String,
    pub include_date: bool,
    pub date_format: DateFormat,
    /// Template with `{title}`, `{date}` and `{random}` placeholders.
    pub custom_pattern: String,
    pub hash_length: usize,
    pub include_random: bool,
    pub random_length: usize,
}

impl Default for PermalinkOptions {
    fn default() -> Self {
        Self {
            strategy: PermalinkStrategy::Smart,
            separator: Separator::Hyphen,
            max_length: 60,
            preserve_case: false,
            remove_stop_words: true,
            prefix: String::new(),
            suffix: String::new(),
            include_date: false,
            date_format: DateFormat::YearMonthDay,
            custom_pattern: "{title}-{date}-{random}".to_string(),
            hash_length: 8,
            include_random: false,
            random_length: 4,
        }
    }
}

impl PermalinkOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        check_range("max_length", self.max_length, 10, 200)?;
        check_range("hash_length", self.hash_length, 1, 64)?;
        check_range("random_length", self.random_length, 2, 10)?;
        Ok(())
    }
}

fn check_range(name: &'static str, actual: usize, min: usize, max: usize) -> Result<(), ToolError> {
    if (min..=max).contains(&actual) {
        Ok(())
    } else {
        Err(ToolError::OutOfRange {
            name,
            min,
            max,
            actual,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermalinkScores {
    pub seo_score: f64,
    pub uniqueness: f64,
    pub readability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermalinkResult {
    pub original: String,
    pub permalink: String,
    pub strategy: &'static str,
    pub length: usize,
    #[serde(flatten)]
    pub scores: PermalinkScores,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermalinkValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Normalize text ahead of slug building: tags stripped, punctuation spaced out,
/// whitespace collapsed, optionally lowercased and stop-word free.
pub fn clean_text(text: &str, options: &PermalinkOptions) -> String {
    let cleaned = HTML_TAG.replace_all(text.trim(), "");
    let cleaned = SPECIAL_CHARS.replace_all(&cleaned, " ");
    let mut cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ").into_owned();
    if !options.preserve_case {
        cleaned = cleaned.to_lowercase();
    }
    if options.remove_stop_words {
        cleaned = cleaned
            .split(' ')
            .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
            .collect::<Vec<_>>()
            .join(" ");
    }
    cleaned.trim().to_string()
}

pub fn generate_permalink<R: Rng>(
    text: &str,
    strategy: PermalinkStrategy,
    options: &PermalinkOptions,
    now: &DateTime<Local>,
    rng: &mut R,
) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let separator = options.separator.as_str();
    let cleaned = clean_text(text, options);

    let mut permalink = match strategy {
        PermalinkStrategy::Seo => cleaned
            .split(' ')
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(separator),
        PermalinkStrategy::Uuid => {
            let mut bytes = [0u8; 16];
            rng.fill_bytes(&mut bytes);
            uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .hyphenated()
                .to_string()
                .replace('-', separator)
        }
        PermalinkStrategy::Hash => STANDARD
            .encode(cleaned.as_bytes())
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(options.hash_length)
            .collect(),
        PermalinkStrategy::Timestamp => format!("post-{}", now.timestamp_millis()),
        PermalinkStrategy::Custom => {
            let title = WHITESPACE_RUN.replace_all(&cleaned, separator);
            let date = if options.include_date {
                options.date_format.format(now)
            } else {
                String::new()
            };
            let random = if options.include_random {
                random_string(options.random_length, rng)
            } else {
                String::new()
            };
            let filled = options
                .custom_pattern
                .replacen("{title}", &title, 1)
                .replacen("{date}", &date, 1)
                .replacen("{random}", &random, 1);
            WHITESPACE_RUN.replace_all(&filled, separator).into_owned()
        }
        PermalinkStrategy::Smart => cleaned
            .split(' ')
            .filter(|w| w.chars().count() > 2)
            .take(6)
            .collect::<Vec<_>>()
            .join(separator),
    };

    if !options.prefix.is_empty() {
        permalink = format!("{}{}{}", options.prefix, separator, permalink);
    }
    if !options.suffix.is_empty() {
        permalink = format!("{}{}{}", permalink, separator, options.suffix);
    }

    let mut permalink = truncate_at_separator(&permalink, options.max_length, separator);
    if !separator.is_empty() {
        while permalink.ends_with(separator) {
            permalink.truncate(permalink.len() - separator.len());
        }
    }
    permalink
}

/// Cut to `max_length` characters, backing up to the last separator when the cut
/// would split a word. Without a separator, or when the first word alone is too
/// long, the cut is hard.
pub(crate) fn truncate_at_separator(text: &str, max_length: usize, separator: &str) -> String {
    let Some((cut_index, _)) = text.char_indices().nth(max_length) else {
        return text.to_string();
    };
    let cut = &text[..cut_index];
    if separator.is_empty() || text[cut_index..].starts_with(separator) {
        return cut.to_string();
    }
    match cut.rfind(separator) {
        Some(boundary) if boundary > 0 => cut[..boundary].to_string(),
        _ => cut.to_string(),
    }
}

fn random_string<R: Rng>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| RANDOM_ALPHABET[rng.random_range(0..RANDOM_ALPHABET.len())] as char)
        .collect()
}

fn words<'a>(permalink: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        vec![permalink]
    } else {
        permalink.split(separator).collect()
    }
}

pub fn score(permalink: &str, separator: Separator) -> PermalinkScores {
    PermalinkScores {
        seo_score: seo_score(permalink, separator),
        uniqueness: uniqueness(permalink, separator),
        readability: readability(permalink, separator),
    }
}

/// 0–100 from length, word count, character variety, leading digit and URL-safe
/// characters.
pub fn seo_score(permalink: &str, separator: Separator) -> f64 {
    let length = permalink.chars().count();
    let mut score = 0.0;

    score += match length {
        30..=60 => 30.0,
        20..=80 => 20.0,
        10..=100 => 10.0,
        _ => 0.0,
    };

    score += match words(permalink, separator.as_str()).len() {
        3..=5 => 25.0,
        2..=7 => 15.0,
        _ => 0.0,
    };

    if length > 0 {
        let unique: HashSet<char> = permalink.to_lowercase().chars().collect();
        score += (unique.len() as f64 / length as f64 * 20.0).min(20.0);
    }

    if !permalink.starts_with(|c: char| c.is_ascii_digit()) {
        score += 15.0;
    }
    if !URL_UNSAFE.is_match(permalink) {
        score += 10.0;
    }

    score.min(100.0)
}

pub fn uniqueness(permalink: &str, separator: Separator) -> f64 {
    let words = words(permalink, separator.as_str());
    let unique: HashSet<&str> = words.iter().copied().collect();
    (unique.len() as f64 / words.len() as f64 * 100.0).min(100.0)
}

pub fn readability(permalink: &str, separator: Separator) -> f64 {
    let words = words(permalink, separator.as_str());
    let letters: usize = words.iter().map(|w| w.chars().count()).sum();
    let average = letters as f64 / words.len() as f64;
    if (4.0..=8.0).contains(&average) {
        100.0
    } else if (3.0..=10.0).contains(&average) {
        80.0
    } else if (2.0..=12.0).contains(&average) {
        60.0
    } else {
        40.0
    }
}

pub fn validate_permalink(permalink: &str, separator: Separator) -> PermalinkValidation {
    if permalink.is_empty() {
        return PermalinkValidation {
            is_valid: false,
            issues: vec!["Permalink is empty".to_string()],
            suggestions: vec!["Enter some text to generate a permalink".to_string()],
        };
    }

    let mut checks: Vec<(&str, &str)> = Vec::new();
    let length = permalink.chars().count();
    let sep = separator.as_str();

    if length < 5 {
        checks.push(("Too short (minimum 5 characters)", "Add more descriptive words"));
    }
    if length > 100 {
        checks.push((
            "Too long (maximum 100 characters recommended)",
            "Consider shortening the permalink",
        ));
    }
    if URL_UNSAFE.is_match(permalink) {
        checks.push((
            "Contains special characters",
            "Use only letters, numbers, hyphens, and underscores",
        ));
    }
    if permalink.starts_with(|c: char| c.is_ascii_digit()) {
        checks.push(("Starts with a number", "Start with a letter for better SEO"));
    }
    if !sep.is_empty() && permalink.contains(&sep.repeat(2)) {
        checks.push((
            "Contains multiple consecutive separators",
            "Remove duplicate separators",
        ));
    }
    if !sep.is_empty() && permalink.ends_with(sep) {
        checks.push(("Ends with a separator", "Remove trailing separator"));
    }

    PermalinkValidation {
        is_valid: checks.is_empty(),
        issues: checks.iter().map(|(issue, _)| issue.to_string()).collect(),
        suggestions: checks.iter().map(|(_, hint)| hint.to_string()).collect(),
    }
}

/// One result per strategy, in [`PermalinkStrategy::ALL`] order. Blank input
/// yields no results.
pub fn generate_variations<R: Rng>(
    text: &str,
    options: &PermalinkOptions,
    now: &DateTime<Local>,
    rng: &mut R,
) -> Vec<PermalinkResult> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    PermalinkStrategy::ALL
        .iter()
        .map(|&strategy| {
            let permalink = generate_permalink(text, strategy, options, now, rng);
            PermalinkResult {
                original: text.to_string(),
                length: permalink.chars().count(),
                scores: score(&permalink, options.separator),
                strategy: strategy.display_name(),
                timestamp: now.timestamp_millis(),
                permalink,
            }
        })
        .collect()
}

#[derive(Serialize)]
struct PermalinkExport<'a> {
    original: &'a str,
    generated: String,
    permalinks: &'a [PermalinkResult],
}

/// JSON document `{ original, generated, permalinks }` for download.
pub fn export_json(
    original: &str,
    permalinks: &[PermalinkResult],
    now: &DateTime<Local>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PermalinkExport {
        original,
        generated: now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        permalinks,
    })
}

pub fn export_filename(now: &DateTime<Local>) -> String {
    format!("permalinks-{}.json", now.with_timezone(&Utc).format("%Y-%m-%d"))
}
