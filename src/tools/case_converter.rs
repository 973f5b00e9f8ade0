// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Case conversion between eight naming styles.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::capitalize_first;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+(.)").expect("Invalid regex"));
static NON_ALPHANUMERIC_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Invalid regex"));
static ASCII_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    /// Any unrecognized mode name; leaves the text as is.
    #[serde(other)]
    Unchanged,
}

impl CaseMode {
    pub const ALL: [CaseMode; 8] = [
        CaseMode::Upper,
        CaseMode::Lower,
        CaseMode::Title,
        CaseMode::Sentence,
        CaseMode::Camel,
        CaseMode::Pascal,
        CaseMode::Snake,
        CaseMode::Kebab,
    ];

    /// Parse a mode name; anything unknown maps to [`CaseMode::Unchanged`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "upper" => CaseMode::Upper,
            "lower" => CaseMode::Lower,
            "title" => CaseMode::Title,
            "sentence" => CaseMode::Sentence,
            "camel" => CaseMode::Camel,
            "pascal" => CaseMode::Pascal,
            "snake" => CaseMode::Snake,
            "kebab" => CaseMode::Kebab,
            _ => CaseMode::Unchanged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
            CaseMode::Title => "title",
            CaseMode::Sentence => "sentence",
            CaseMode::Camel => "camel",
            CaseMode::Pascal => "pascal",
            CaseMode::Snake => "snake",
            CaseMode::Kebab => "kebab",
            CaseMode::Unchanged => "unchanged",
        }
    }
}

pub fn convert_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Title => text
            .to_lowercase()
            .split(' ')
            .map(capitalize_first)
            .collect::<Vec<_>>()
            .join(" "),
        CaseMode::Sentence => text
            .to_lowercase()
            .split(". ")
            .map(capitalize_first)
            .collect::<Vec<_>>()
            .join(". "),
        CaseMode::Camel => CAMEL_BOUNDARY
            .replace_all(&text.to_lowercase(), |caps: &Captures| caps[1].to_uppercase())
            .into_owned(),
        CaseMode::Pascal => NON_ALPHANUMERIC_RUN
            .split(&text.to_lowercase())
            .map(capitalize_first)
            .collect(),
        CaseMode::Snake => separated(text, "_"),
        CaseMode::Kebab => separated(text, "-"),
        CaseMode::Unchanged => text.to_string(),
    }
}

/// Convert using a mode name; unknown names return the text unchanged.
pub fn convert_case_named(text: &str, mode: &str) -> String {
    convert_case(text, CaseMode::from_name(mode))
}

fn separated(text: &str, separator: &str) -> String {
    let lowered = text.to_lowercase();
    let joined = NON_ALPHANUMERIC_RUN.replace_all(&lowered, separator);
    let split_upper = ASCII_UPPER.replace_all(&joined, format!("{separator}$1").as_str());
    split_upper.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_convert_case_table_driven() {
        let cases = vec![
            ("upper", "Hello World", CaseMode::Upper, "HELLO WORLD"),
            ("lower", "Hello World", CaseMode::Lower, "hello world"),
            ("title", "hELLO wORLD", CaseMode::Title, "Hello World"),
            ("title keeps empty pieces", "a  b", CaseMode::Title, "A  B"),
            (
                "sentence",
                "first one. second ONE. third",
                CaseMode::Sentence,
                "First one. Second one. Third",
            ),
            ("camel", "hello big world", CaseMode::Camel, "helloBigWorld"),
            ("camel leading separator", "--hello world", CaseMode::Camel, "HelloWorld"),
            ("camel trailing run kept", "hello world!", CaseMode::Camel, "helloWorld!"),
            ("pascal", "hello big_world", CaseMode::Pascal, "HelloBigWorld"),
            ("snake", "Hello Big-World", CaseMode::Snake, "hello_big_world"),
            ("kebab", "Hello Big_World!", CaseMode::Kebab, "hello-big-world-"),
            ("unchanged", "MiXeD", CaseMode::Unchanged, "MiXeD"),
        ];

        for (name, input, mode, expected) in cases {
            assert_eq!(convert_case(input, mode), expected, "case: {}", name);
        }
    }

    #[test]
    fn test_unknown_mode_name_is_identity() {
        assert_eq!(convert_case_named("Keep Me", "shouty"), "Keep Me");
        assert_eq!(convert_case_named("Keep Me", "KEBAB"), "keep-me");
    }

    #[test]
    fn test_mode_deserializes_unknown_as_unchanged() {
        let mode: CaseMode = serde_yaml::from_str("screaming").unwrap();
        assert_eq!(mode, CaseMode::Unchanged);
        let mode: CaseMode = serde_yaml::from_str("pascal").unwrap();
        assert_eq!(mode, CaseMode::Pascal);
    }

    #[test]
    fn test_all_modes_total_on_empty_input() {
        for mode in CaseMode::ALL {
            assert_eq!(convert_case("", mode), "", "mode {}", mode.as_str());
        }
    }

    proptest! {
        #[test]
        fn upper_of_lower_equals_upper(s in "[a-zA-Z0-9 àéîõüÀÉÎÕÜ.,!?_-]{0,64}") {
            prop_assert_eq!(
                convert_case(&convert_case(&s, CaseMode::Lower), CaseMode::Upper),
                convert_case(&s, CaseMode::Upper)
            );
        }

        #[test]
        fn camel_drops_inner_separators(s in "[a-z0-9]{1,8}([ _.,;-]{1,3}[a-z0-9]{1,8}){0,5}") {
            let camel = convert_case(&s, CaseMode::Camel);
            prop_assert!(camel.chars().all(|c| c.is_ascii_alphanumeric()), "{}", camel);
        }
    }
}
