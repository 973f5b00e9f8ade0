// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lorem ipsum placeholder text.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::capitalize_first;
use crate::errors::ToolError;

pub const MAX_COUNT: usize = 100;

const WORDS: [&str; 63] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "dolore", "fugiat", "nulla",
    "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa",
    "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

const SENTENCE_WORDS: std::ops::Range<usize> = 8..18;
const PARAGRAPH_SENTENCES: std::ops::Range<usize> = 3..6;

const LOREM_SENTENCE: &str = "Lorem ipsum dolor sit amet.";
const LOREM_PARAGRAPH_OPENING: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoremKind {
    Words,
    Sentences,
    #[default]
    Paragraphs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoremOptions {
    pub kind: LoremKind,
    pub count: usize,
    pub start_with_lorem: bool,
    /// Wrap paragraphs in `<p>` tags. Ignored for words and sentences.
    pub include_html: bool,
}

impl Default for LoremOptions {
    fn default() -> Self {
        Self {
            kind: LoremKind::Paragraphs,
            count: 3,
            start_with_lorem: true,
            include_html: false,
        }
    }
}

impl LoremOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.count > MAX_COUNT {
            return Err(ToolError::OutOfRange {
                name: "count",
                min: 0,
                max: MAX_COUNT,
                actual: self.count,
            });
        }
        Ok(())
    }
}

pub fn generate<R: Rng>(options: &LoremOptions, rng: &mut R) -> String {
    if options.count == 0 {
        return String::new();
    }

    match options.kind {
        LoremKind::Words => {
            let text = (0..options.count).map(|_| word(rng)).collect::<Vec<_>>().join(" ");
            if options.start_with_lorem && options.count >= 2 {
                replace_first_two_words(&text)
            } else {
                text
            }
        }
        LoremKind::Sentences => {
            let text = (0..options.count)
                .map(|_| sentence(rng))
                .collect::<Vec<_>>()
                .join(" ");
            if options.start_with_lorem {
                splice_opening(LOREM_SENTENCE, &text)
            } else {
                text
            }
        }
        LoremKind::Paragraphs => {
            let mut text = (0..options.count)
                .map(|_| paragraph(rng))
                .collect::<Vec<_>>()
                .join("\n\n");
            if options.start_with_lorem {
                text = splice_opening(LOREM_PARAGRAPH_OPENING, &text);
            }
            if options.include_html {
                text = text
                    .split("\n\n")
                    .map(|p| format!("<p>{}</p>", p))
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            text
        }
    }
}

fn word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS[rng.random_range(0..WORDS.len())]
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(SENTENCE_WORDS);
    let words = (0..count).map(|_| word(rng)).collect::<Vec<_>>().join(" ");
    format!("{}.", capitalize_first(&words))
}

fn paragraph<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(PARAGRAPH_SENTENCES);
    (0..count).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// "lorem ipsum" followed by everything from the second space on.
fn replace_first_two_words(text: &str) -> String {
    let rest = text
        .match_indices(' ')
        .nth(1)
        .map(|(index, _)| &text[index..])
        .unwrap_or("");
    format!("lorem ipsum{}", rest)
}

/// `opening` followed by everything after the first period of `text`.
fn splice_opening(opening: &str, text: &str) -> String {
    let rest = text.find('.').map(|index| &text[index + 1..]).unwrap_or(text);
    format!("{}{}", opening, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn options(kind: LoremKind, count: usize) -> LoremOptions {
        LoremOptions {
            kind,
            count,
            start_with_lorem: false,
            include_html: false,
        }
    }

    #[test]
    fn test_words_come_from_the_pool() {
        let text = generate(&options(LoremKind::Words, 40), &mut seeded());
        let words: Vec<&str> = text.split(' ').collect();
        assert_eq!(words.len(), 40);
        assert!(words.iter().all(|w| WORDS.contains(w)));
    }

    #[test]
    fn test_sentence_shape() {
        let text = generate(&options(LoremKind::Sentences, 25), &mut seeded());
        let sentences: Vec<&str> = text.split(". ").collect();
        assert_eq!(sentences.len(), 25);
        for s in sentences {
            let words = s.trim_end_matches('.').split(' ').count();
            assert!(SENTENCE_WORDS.contains(&words), "sentence has {} words", words);
            assert!(s.chars().next().is_some_and(|c| c.is_uppercase()));
        }
        assert!(text.ends_with('.'));
    }

    #[test]
    fn test_paragraph_shape() {
        let text = generate(&options(LoremKind::Paragraphs, 10), &mut seeded());
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 10);
        for p in paragraphs {
            let sentences = p.matches('.').count();
            assert!(PARAGRAPH_SENTENCES.contains(&sentences));
        }
    }

    #[test]
    fn test_start_with_lorem_per_kind() {
        let mut opts = options(LoremKind::Words, 5);
        opts.start_with_lorem = true;
        let words = generate(&opts, &mut seeded());
        assert!(words.starts_with("lorem ipsum "));
        assert_eq!(words.split(' ').count(), 5);

        opts.kind = LoremKind::Sentences;
        assert!(generate(&opts, &mut seeded()).starts_with("Lorem ipsum dolor sit amet. "));

        opts.kind = LoremKind::Paragraphs;
        assert!(generate(&opts, &mut seeded())
            .starts_with("Lorem ipsum dolor sit amet, consectetur adipiscing elit. "));
    }

    #[test]
    fn test_start_with_lorem_two_words() {
        let mut opts = options(LoremKind::Words, 2);
        opts.start_with_lorem = true;
        assert_eq!(generate(&opts, &mut seeded()), "lorem ipsum");

        opts.count = 1;
        assert_eq!(generate(&opts, &mut seeded()).split(' ').count(), 1);
    }

    #[test]
    fn test_html_wraps_paragraphs_only() {
        let mut opts = options(LoremKind::Paragraphs, 3);
        opts.include_html = true;
        let html = generate(&opts, &mut seeded());
        let lines: Vec<&str> = html.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("<p>") && l.ends_with("</p>")));

        opts.kind = LoremKind::Sentences;
        assert!(!generate(&opts, &mut seeded()).contains("<p>"));
    }

    #[test]
    fn test_zero_count_is_empty() {
        for kind in [LoremKind::Words, LoremKind::Sentences, LoremKind::Paragraphs] {
            let mut opts = options(kind, 0);
            opts.start_with_lorem = true;
            assert_eq!(generate(&opts, &mut seeded()), "");
        }
    }

    #[test]
    fn test_validate_count() {
        assert!(options(LoremKind::Words, 100).validate().is_ok());
        assert!(matches!(
            options(LoremKind::Words, 101).validate(),
            Err(ToolError::OutOfRange { name: "count", .. })
        ));
    }

    #[test]
    fn test_same_seed_same_text() {
        let opts = LoremOptions::default();
        assert_eq!(generate(&opts, &mut seeded()), generate(&opts, &mut seeded()));
    }
}
