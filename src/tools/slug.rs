// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! URL slugs from free text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::permalink::{truncate_at_separator, Separator};
use crate::errors::ToolError;

static SLUG_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("Invalid regex"));

const STOP_WORDS: [&str; 25] = [
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugOptions {
    pub separator: Separator,
    pub lowercase: bool,
    pub remove_stop_words: bool,
    pub max_length: usize,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Hyphen,
            lowercase: true,
            remove_stop_words: false,
            max_length: 100,
        }
    }
}

impl SlugOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.separator == Separator::None {
            return Err(ToolError::InvalidChoice {
                name: "separator",
                value: String::new(),
            });
        }
        if !(1..=200).contains(&self.max_length) {
            return Err(ToolError::OutOfRange {
                name: "max_length",
                min: 1,
                max: 200,
                actual: self.max_length,
            });
        }
        Ok(())
    }
}

/// Build a slug no longer than `max_length` characters that neither starts nor
/// ends with the separator.
pub fn slugify(text: &str, options: &SlugOptions) -> String {
    let separator = options.separator.as_str();

    let words: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            let word = SLUG_UNSAFE.replace_all(word, "");
            if options.lowercase {
                word.to_lowercase()
            } else {
                word.into_owned()
            }
        })
        .filter(|word| !word.is_empty())
        .filter(|word| {
            !options.remove_stop_words || !STOP_WORDS.contains(&word.to_lowercase().as_str())
        })
        .collect();

    let slug = words.join(separator);
    let slug = truncate_at_separator(&slug, options.max_length, separator);
    trim_separator(&slug, separator).to_string()
}

fn trim_separator<'a>(slug: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return slug;
    }
    let mut trimmed = slug;
    while let Some(rest) = trimmed.strip_prefix(separator) {
        trimmed = rest;
    }
    while let Some(rest) = trimmed.strip_suffix(separator) {
        trimmed = rest;
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_table_driven() {
        let defaults = SlugOptions::default();
        let no_stop = SlugOptions {
            remove_stop_words: true,
            ..SlugOptions::default()
        };
        let underscore = SlugOptions {
            separator: Separator::Underscore,
            lowercase: false,
            ..SlugOptions::default()
        };
        let cases = vec![
            ("Hello, World!", &defaults, "hello-world"),
            ("  The   Rust  Book  ", &defaults, "the-rust-book"),
            ("The Rust Book is at the Store", &no_stop, "rust-book-store"),
            ("Keep Case Here", &underscore, "Keep_Case_Here"),
            ("!!! ???", &defaults, ""),
            ("", &defaults, ""),
            ("café au lait", &defaults, "café-au-lait"),
        ];
        for (input, options, expected) in cases {
            assert_eq!(slugify(input, options), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_truncation_backs_off_to_word_boundary() {
        let options = SlugOptions {
            max_length: 12,
            ..SlugOptions::default()
        };
        assert_eq!(slugify("alpha beta gamma delta", &options), "alpha-beta");
    }

    #[test]
    fn test_truncation_hard_cuts_single_long_word() {
        let options = SlugOptions {
            max_length: 5,
            ..SlugOptions::default()
        };
        assert_eq!(slugify("extraordinary", &options), "extra");
    }

    #[test]
    fn test_dangling_hyphens_trimmed() {
        let options = SlugOptions::default();
        assert_eq!(slugify("- leading and trailing -", &options), "leading-and-trailing");
    }

    #[test]
    fn test_validate() {
        assert!(SlugOptions::default().validate().is_ok());
        let none = SlugOptions {
            separator: Separator::None,
            ..SlugOptions::default()
        };
        assert!(matches!(none.validate(), Err(ToolError::InvalidChoice { .. })));
        let zero = SlugOptions {
            max_length: 0,
            ..SlugOptions::default()
        };
        assert!(matches!(zero.validate(), Err(ToolError::OutOfRange { .. })));
    }

    proptest! {
        #[test]
        fn slug_respects_length_and_edges(text in ".{0,120}", max_length in 1usize..=200) {
            let options = SlugOptions { max_length, ..SlugOptions::default() };
            let slug = slugify(&text, &options);
            prop_assert!(slug.chars().count() <= max_length);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
        }
    }
}
