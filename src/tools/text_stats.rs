// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Word/character counting and readability analysis.
//!
//! Counts follow simple textual rules (whitespace-delimited words, sentences split
//! on runs of `.!?`, paragraphs on blank lines). Readability uses the classic Flesch
//! Reading Ease, Flesch-Kincaid grade and Gunning Fog formulas with a vowel-group
//! syllable estimate, so scores are approximate for anything but plain English.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::Write as _;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid regex"));
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("Invalid regex"));
static VOWEL_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]+").expect("Invalid regex"));

pub const READING_WORDS_PER_MINUTE: usize = 250;
pub const SPEAKING_WORDS_PER_MINUTE: usize = 150;

const TOP_WORDS: usize = 10;
const EXTREME_WORDS: usize = 5;
const LANGUAGE_SAMPLE: usize = 50;

const COMMON_ENGLISH: [&str; 35] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one",
];

/// Character limits of the social platforms checked by [`analyze`].
pub const SOCIAL_LIMITS: [(&str, usize); 4] = [
    ("twitter", 280),
    ("facebook", 63206),
    ("instagram", 2200),
    ("linkedin", 3000),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Language {
    English,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    /// Share of all counted words, 0–100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLimit {
    pub platform: &'static str,
    pub limit: usize,
    pub used: usize,
    /// Negative once the text is over the limit.
    pub remaining: i64,
    pub over_limit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextStatistics {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
    pub reading_time_minutes: usize,
    pub speaking_time_minutes: usize,
    pub average_word_length: f64,
    pub longest_word: String,
    pub average_words_per_sentence: f64,
    pub syllables: usize,
    pub average_syllables_per_word: f64,
    pub complex_words: usize,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub unique_words: usize,
    pub vocabulary_richness: f64,
    pub repetition_rate: f64,
    pub top_words: Vec<WordFrequency>,
    pub longest_words: Vec<String>,
    pub shortest_words: Vec<String>,
    pub language: Language,
    pub social_limits: Vec<SocialLimit>,
}

pub fn analyze(text: &str) -> TextStatistics {
    if text.trim().is_empty() {
        return TextStatistics {
            social_limits: social_limits(0),
            ..TextStatistics::default()
        };
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let words = tokens.len();
    let characters = text.chars().count();
    let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
    let sentences = SENTENCE_BREAK
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraphs = PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();
    let lines = text.split('\n').count();

    let total_letters: usize = tokens.iter().map(|t| t.chars().count()).sum();
    let longest_word = tokens
        .iter()
        .copied()
        .fold("", |longest, t| {
            if t.chars().count() > longest.chars().count() {
                t
            } else {
                longest
            }
        })
        .to_string();

    let per_word_syllables: Vec<usize> = tokens.iter().map(|t| count_syllables(t)).collect();
    let syllables: usize = per_word_syllables.iter().sum();
    let complex_words = per_word_syllables.iter().filter(|&&s| s >= 3).count();

    let w = words as f64;
    let s = sentences.max(1) as f64;
    let words_per_sentence = w / s;
    let syllables_per_word = syllables as f64 / w;

    let flesch_reading_ease =
        (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0);
    let flesch_kincaid_grade =
        (0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59).max(0.0);
    let gunning_fog = 0.4 * (words_per_sentence + 100.0 * (complex_words as f64 / w));

    let frequencies = word_frequencies(&tokens);
    let counted: usize = frequencies.values().sum();
    let unique_words = frequencies.len();
    let (vocabulary_richness, repetition_rate) = if counted > 0 {
        (
            unique_words as f64 / counted as f64 * 100.0,
            (counted - unique_words) as f64 / counted as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let mut ranked: Vec<(&String, &usize)> = frequencies.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    let top_words = ranked
        .into_iter()
        .take(TOP_WORDS)
        .map(|(word, &count)| WordFrequency {
            word: word.clone(),
            count,
            percentage: count as f64 / counted as f64 * 100.0,
        })
        .collect();

    // Stable sorts over first-occurrence order, so ties keep their original order.
    let mut longest: Vec<&String> = frequencies.keys().collect();
    longest.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    let mut shortest: Vec<&String> = frequencies.keys().collect();
    shortest.sort_by_key(|w| w.chars().count());
    let longest_words = longest.into_iter().take(EXTREME_WORDS).cloned().collect();
    let shortest_words = shortest.into_iter().take(EXTREME_WORDS).cloned().collect();

    TextStatistics {
        words,
        characters,
        characters_no_spaces,
        sentences,
        paragraphs,
        lines,
        reading_time_minutes: words.div_ceil(READING_WORDS_PER_MINUTE),
        speaking_time_minutes: words.div_ceil(SPEAKING_WORDS_PER_MINUTE),
        average_word_length: total_letters as f64 / w,
        longest_word,
        average_words_per_sentence: if sentences > 0 { w / sentences as f64 } else { 0.0 },
        syllables,
        average_syllables_per_word: syllables_per_word,
        complex_words,
        flesch_reading_ease,
        flesch_kincaid_grade,
        gunning_fog,
        unique_words,
        vocabulary_richness,
        repetition_rate,
        top_words,
        longest_words,
        shortest_words,
        language: detect_language(&frequencies),
        social_limits: social_limits(characters),
    }
}

/// Vowel groups in the lowercased word, never fewer than one.
pub fn count_syllables(word: &str) -> usize {
    VOWEL_GROUP.find_iter(&word.to_lowercase()).count().max(1)
}

/// Lowercased, non-word-stripped words with their counts in first-occurrence order.
fn word_frequencies(tokens: &[&str]) -> IndexMap<String, usize> {
    let mut frequencies = IndexMap::new();
    for token in tokens {
        let cleaned = NON_WORD.replace_all(&token.to_lowercase(), "").into_owned();
        if cleaned.is_empty() {
            continue;
        }
        *frequencies.entry(cleaned).or_insert(0) += 1;
    }
    frequencies
}

fn detect_language(frequencies: &IndexMap<String, usize>) -> Language {
    let sample: Vec<&String> = frequencies.keys().take(LANGUAGE_SAMPLE).collect();
    if sample.is_empty() {
        return Language::Unknown;
    }
    let common = sample
        .iter()
        .filter(|w| COMMON_ENGLISH.contains(&w.as_str()))
        .count();
    if common as f64 > sample.len() as f64 * 0.1 {
        Language::English
    } else {
        Language::Unknown
    }
}

fn social_limits(characters: usize) -> Vec<SocialLimit> {
    SOCIAL_LIMITS
        .iter()
        .map(|&(platform, limit)| SocialLimit {
            platform,
            limit,
            used: characters,
            remaining: limit as i64 - characters as i64,
            over_limit: characters > limit,
        })
        .collect()
}

/// Plain-text analysis report, suitable for a `.txt` download.
pub fn render_report(stats: &TextStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TEXT ANALYSIS REPORT");
    let _ = writeln!(out, "====================");
    let _ = writeln!(out);
    let _ = writeln!(out, "BASIC STATISTICS");
    let _ = writeln!(out, "Words: {}", stats.words);
    let _ = writeln!(out, "Characters: {}", stats.characters);
    let _ = writeln!(out, "Characters (no spaces): {}", stats.characters_no_spaces);
    let _ = writeln!(out, "Sentences: {}", stats.sentences);
    let _ = writeln!(out, "Paragraphs: {}", stats.paragraphs);
    let _ = writeln!(out, "Lines: {}", stats.lines);
    let _ = writeln!(out, "Reading time: {} min", stats.reading_time_minutes);
    let _ = writeln!(out, "Speaking time: {} min", stats.speaking_time_minutes);
    let _ = writeln!(out);
    let _ = writeln!(out, "READABILITY");
    let _ = writeln!(out, "Flesch Reading Ease: {:.1}", stats.flesch_reading_ease);
    let _ = writeln!(out, "Flesch-Kincaid Grade: {:.1}", stats.flesch_kincaid_grade);
    let _ = writeln!(out, "Gunning Fog Index: {:.1}", stats.gunning_fog);
    let _ = writeln!(out, "Average words per sentence: {:.1}", stats.average_words_per_sentence);
    let _ = writeln!(out, "Average syllables per word: {:.1}", stats.average_syllables_per_word);
    let _ = writeln!(out);
    let _ = writeln!(out, "VOCABULARY");
    let _ = writeln!(out, "Unique words: {}", stats.unique_words);
    let _ = writeln!(out, "Vocabulary richness: {:.1}%", stats.vocabulary_richness);
    let _ = writeln!(out, "Repetition rate: {:.1}%", stats.repetition_rate);
    let _ = writeln!(out, "Average word length: {:.1}", stats.average_word_length);
    let _ = writeln!(out, "Language: {:?}", stats.language);
    let _ = writeln!(out);
    let _ = writeln!(out, "TOP WORDS");
    for (rank, entry) in stats.top_words.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: {} ({:.1}%)",
            rank + 1,
            entry.word,
            entry.count,
            entry.percentage
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Longest words: {}", stats.longest_words.join(", "));
    let _ = writeln!(out, "Shortest words: {}", stats.shortest_words.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "SOCIAL MEDIA LIMITS");
    for limit in &stats.social_limits {
        let status = if limit.over_limit { "over limit" } else { "ok" };
        let _ = writeln!(
            out,
            "{}: {}/{} ({})",
            limit.platform, limit.used, limit.limit, status
        );
    }
    out
}
