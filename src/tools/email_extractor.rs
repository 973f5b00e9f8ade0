// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Email address extraction with optional validation, de-duplication and sorting.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// RFC 5322 approximation, matched case-insensitively.
static STRICT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r##"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"##,
    )
    .case_insensitive(true)
    .build()
    .expect("Invalid regex")
});

static BASIC_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("Invalid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorOptions {
    /// Use the strict pattern for extraction and count valid/invalid with it.
    pub validate_emails: bool,
    pub remove_duplicates: bool,
    pub sort_alphabetically: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            validate_emails: true,
            remove_duplicates: true,
            sort_alphabetically: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractorStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailExtraction {
    pub emails: Vec<String>,
    pub stats: ExtractorStats,
}

impl EmailExtraction {
    /// One address per line.
    pub fn output_text(&self) -> String {
        self.emails.join("\n")
    }
}

pub fn extract(text: &str, options: &ExtractorOptions) -> EmailExtraction {
    let pattern: &Regex = if options.validate_emails {
        &STRICT_EMAIL
    } else {
        &BASIC_EMAIL
    };

    let mut emails: Vec<String> = pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut duplicates = 0;
    if options.remove_duplicates {
        let mut seen = HashSet::new();
        emails.retain(|email| {
            let fresh = seen.insert(email.to_lowercase());
            if !fresh {
                duplicates += 1;
            }
            fresh
        });
    }

    if options.sort_alphabetically {
        emails.sort_by_key(|email| email.to_lowercase());
    }

    let (valid, invalid) = if options.validate_emails {
        let valid = emails.iter().filter(|e| STRICT_EMAIL.is_match(e)).count();
        (valid, emails.len() - valid)
    } else {
        (emails.len(), 0)
    };

    EmailExtraction {
        stats: ExtractorStats {
            total: emails.len(),
            valid,
            invalid,
            duplicates,
        },
        emails,
    }
}

/// CSV export: addresses joined by `",\n"`, blank entries skipped.
pub fn to_csv(emails: &[String]) -> String {
    emails
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(",\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_case_insensitive() {
        let result = extract("Contact a@b.com or A@B.COM", &ExtractorOptions::default());
        assert_eq!(result.emails, vec!["a@b.com"]);
        assert_eq!(result.stats.duplicates, 1);
        assert_eq!(result.stats.total, 1);
        assert_eq!(result.stats.valid, 1);
        assert_eq!(result.stats.invalid, 0);
    }

    #[test]
    fn test_extract_options_table_driven() {
        let text = "zed@example.org, amy@Example.com; bob@test.io and zed@example.org";
        let cases = vec![
            (
                "keep duplicates",
                ExtractorOptions {
                    validate_emails: false,
                    remove_duplicates: false,
                    sort_alphabetically: false,
                },
                vec!["zed@example.org", "amy@Example.com", "bob@test.io", "zed@example.org"],
                0,
            ),
            (
                "dedupe and sort",
                ExtractorOptions {
                    validate_emails: true,
                    remove_duplicates: true,
                    sort_alphabetically: true,
                },
                vec!["amy@Example.com", "bob@test.io", "zed@example.org"],
                1,
            ),
        ];

        for (name, options, expected, duplicates) in cases {
            let result = extract(text, &options);
            assert_eq!(result.emails, expected, "case: {}", name);
            assert_eq!(result.stats.duplicates, duplicates, "case: {}", name);
            assert_eq!(result.stats.total, expected.len(), "case: {}", name);
        }
    }

    #[test]
    fn test_no_matches_is_empty() {
        let result = extract("nothing to see here @ all", &ExtractorOptions::default());
        assert!(result.emails.is_empty());
        assert_eq!(result.stats, ExtractorStats::default());
        assert_eq!(result.output_text(), "");
    }

    #[test]
    fn test_strict_pattern_accepts_quoted_local_part() {
        let result = extract(r#"mail "john.doe"@example.com now"#, &ExtractorOptions::default());
        assert_eq!(result.emails, vec![r#""john.doe"@example.com"#]);
    }

    #[test]
    fn test_basic_pattern_requires_tld() {
        let options = ExtractorOptions {
            validate_emails: false,
            ..ExtractorOptions::default()
        };
        let result = extract("root@localhost and admin@site.net", &options);
        assert_eq!(result.emails, vec!["admin@site.net"]);
        assert_eq!(result.stats.valid, 1);
    }

    #[test]
    fn test_csv_export() {
        let emails = vec!["a@b.com".to_string(), " ".to_string(), "c@d.org".to_string()];
        assert_eq!(to_csv(&emails), "a@b.com,\nc@d.org");
    }
}
