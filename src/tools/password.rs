// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Password generation and strength analysis.
//!
//! Generation is bound to `CryptoRng`: handing it a cosmetic generator such as
//! `SmallRng` does not compile.

use once_cell::sync::Lazy;
use rand::{CryptoRng, Rng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::errors::ToolError;
use crate::observability::messages::tools::PasswordGenerated;
use crate::observability::messages::StructuredLog;
use crate::storage::BoundedList;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
pub const SIMILAR: &str = "il1Lo0O";
pub const AMBIGUOUS: &str = "{}[]()/\\'\"`~,;.<>";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const BULK_FILENAME: &str = "passwords.txt";

static KEYBOARD_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)123|abc|qwe|asd|zxc|987|cba|poi|lkj").expect("Invalid regex")
});
static COMMON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)password|admin|user|login|welcome|qwerty|abc123|[0-9]{4,}").expect("Invalid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
    pub exclude_ambiguous: bool,
    pub require_all_types: bool,
    pub custom_chars: String,
    pub use_custom_chars: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_similar: true,
            exclude_ambiguous: true,
            require_all_types: true,
            custom_chars: String::new(),
            use_custom_chars: false,
        }
    }
}

impl PasswordOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(ToolError::OutOfRange {
                name: "length",
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                actual: self.length,
            });
        }
        Ok(())
    }

    fn uses_custom_chars(&self) -> bool {
        self.use_custom_chars && !self.custom_chars.is_empty()
    }

    /// Enabled character classes after the similar/ambiguous filters.
    fn enabled_classes(&self) -> Vec<Vec<char>> {
        [
            (self.include_uppercase, UPPERCASE),
            (self.include_lowercase, LOWERCASE),
            (self.include_numbers, NUMBERS),
            (self.include_symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, class)| self.filter_excluded(class))
        .filter(|class| !class.is_empty())
        .collect()
    }

    fn filter_excluded(&self, chars: &str) -> Vec<char> {
        chars
            .chars()
            .filter(|c| !(self.exclude_similar && SIMILAR.contains(*c)))
            .filter(|c| !(self.exclude_ambiguous && AMBIGUOUS.contains(*c)))
            .collect()
    }

    /// The characters generation draws from. The custom set is used verbatim and
    /// exclusively when enabled and non-empty.
    pub fn charset(&self) -> Vec<char> {
        if self.uses_custom_chars() {
            return self.custom_chars.chars().collect();
        }
        self.enabled_classes().concat()
    }
}

/// Generate one password of `options.length` characters.
pub fn generate_password<R: Rng + CryptoRng>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String, ToolError> {
    options.validate()?;
    let charset = options.charset();
    if charset.is_empty() {
        return Err(ToolError::EmptyCharset);
    }

    let mut bytes = vec![0u8; options.length];
    rng.fill_bytes(&mut bytes);
    let mut password: Vec<char> = bytes
        .iter()
        .map(|b| charset[*b as usize % charset.len()])
        .collect();

    if options.require_all_types && !options.uses_custom_chars() {
        ensure_all_classes(&mut password, &options.enabled_classes(), rng);
    }

    let password: String = password.into_iter().collect();
    PasswordGenerated {
        length: options.length,
        charset_size: charset.len(),
        strength: analyze_password(&password).strength.as_str(),
    }
    .log();
    Ok(password)
}

/// Splice one character of every missing class into the password. Only
/// positions whose character is not the sole representative of its own class
/// are overwritten, so classes already present stay present.
fn ensure_all_classes<R: Rng>(password: &mut [char], classes: &[Vec<char>], rng: &mut R) {
    let class_of = |c: char| classes.iter().position(|class| class.contains(&c));

    for (index, class) in classes.iter().enumerate() {
        if password.iter().any(|c| class.contains(c)) {
            continue;
        }

        let mut counts = vec![0usize; classes.len()];
        for c in password.iter() {
            if let Some(owner) = class_of(*c) {
                counts[owner] += 1;
            }
        }
        let replaceable: Vec<usize> = password
            .iter()
            .enumerate()
            .filter(|(_, c)| class_of(**c).map_or(true, |owner| owner != index && counts[owner] > 1))
            .map(|(position, _)| position)
            .collect();

        if replaceable.is_empty() {
            continue;
        }
        let position = replaceable[rng.random_range(0..replaceable.len())];
        password[position] = class[rng.random_range(0..class.len())];
    }
}

/// `count` passwords, one per line.
pub fn generate_passwords<R: Rng + CryptoRng>(
    count: usize,
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<Vec<String>, ToolError> {
    (0..count).map(|_| generate_password(options, rng)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=24 => Strength::VeryWeak,
            25..=44 => Strength::Weak,
            45..=59 => Strength::Fair,
            60..=74 => Strength::Good,
            75..=89 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Fair => "Fair",
            Strength::Good => "Good",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }
}

impl Display for Strength {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnalysis {
    pub strength: Strength,
    pub score: u32,
    /// Bits, rounded to one decimal.
    pub entropy: f64,
    pub time_to_crack: String,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Heuristic strength of a password. Advisory only.
pub fn analyze_password(password: &str) -> SecurityAnalysis {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    let length = password.chars().count();
    let mut score: i64 = 0;

    if length < 8 {
        issues.push("Password is too short (less than 8 characters)".to_string());
        suggestions.push("Use at least 12 characters for better security".to_string());
        score += length as i64 * 2;
    } else if length >= 16 {
        score += 30;
    } else if length >= 12 {
        score += 20;
    } else {
        score += 10;
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_number = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut charset_size: u32 = 0;
    for (present, size, variety) in [
        (has_lower, 26, 5),
        (has_upper, 26, 5),
        (has_number, 10, 5),
        (has_symbol, 32, 10),
    ] {
        if present {
            charset_size += size;
            score += variety;
        }
    }

    let entropy = if charset_size == 0 {
        0.0
    } else {
        length as f64 * f64::from(charset_size).log2()
    };
    score += ((entropy / 4.0).floor() as i64).min(25);

    if has_triple_repeat(password) {
        issues.push("Contains repeated characters".to_string());
        suggestions.push("Avoid repeating the same character multiple times".to_string());
        score -= 10;
    }
    if KEYBOARD_SEQUENCE.is_match(password) {
        issues.push("Contains common sequences".to_string());
        suggestions.push("Avoid common keyboard patterns and sequences".to_string());
        score -= 15;
    }
    if COMMON_PATTERN.is_match(password) {
        issues.push("Contains common words or patterns".to_string());
        suggestions.push("Avoid dictionary words and predictable patterns".to_string());
        score -= 20;
    }

    if length >= 16 && has_lower && has_upper && has_number && has_symbol {
        score += 10;
    }

    let score = score.clamp(0, 100) as u32;
    SecurityAnalysis {
        strength: Strength::from_score(score),
        score,
        entropy: (entropy * 10.0).round() / 10.0,
        time_to_crack: time_to_crack(charset_size, length),
        issues,
        suggestions,
    }
}

fn has_triple_repeat(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Brute-force estimate at 10⁹ guesses per second, half the space on average.
pub fn time_to_crack(charset_size: u32, length: usize) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 86_400.0;
    const YEAR: f64 = 31_536_000.0;

    let exponent = i32::try_from(length).unwrap_or(i32::MAX);
    let seconds = f64::from(charset_size).powi(exponent) / 2e9;

    if seconds < 1.0 {
        "Instantly".to_string()
    } else if seconds < MINUTE {
        "Less than a minute".to_string()
    } else if seconds < HOUR {
        format!("{} minutes", (seconds / MINUTE).floor())
    } else if seconds < DAY {
        format!("{} hours", (seconds / HOUR).floor())
    } else if seconds < YEAR {
        format!("{} days", (seconds / DAY).floor())
    } else if seconds < YEAR * 1e3 {
        format!("{} years", (seconds / YEAR).floor())
    } else if seconds < YEAR * 1e6 {
        format!("{} billion years", (seconds / (YEAR * 1e3)).floor())
    } else {
        "Universe lifetime+".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHistoryItem {
    pub password: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub analysis: SecurityAnalysis,
}

impl PasswordHistoryItem {
    pub fn new(password: &str, timestamp: i64) -> Self {
        Self {
            password: password.to_string(),
            timestamp,
            analysis: analyze_password(password),
        }
    }
}

/// The most recent generations, newest first.
#[derive(Debug, Clone, Default)]
pub struct PasswordHistory {
    entries: BoundedList<PasswordHistoryItem>,
}

impl PasswordHistory {
    pub fn record(&mut self, password: &str, timestamp: i64) -> &PasswordHistoryItem {
        self.entries.push(PasswordHistoryItem::new(password, timestamp));
        &self.entries.items()[0]
    }

    /// Replace the entries, e.g. with the list read back from storage.
    pub fn restore(&mut self, entries: BoundedList<PasswordHistoryItem>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[PasswordHistoryItem] {
        self.entries.items()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn has_class(password: &str, class: &str) -> bool {
        password.chars().any(|c| class.contains(c))
    }

    #[test]
    fn test_charset_table_driven() {
        let cases = vec![
            (
                PasswordOptions {
                    include_uppercase: false,
                    include_symbols: false,
                    include_lowercase: false,
                    exclude_similar: false,
                    ..PasswordOptions::default()
                },
                "0123456789",
            ),
            (
                PasswordOptions {
                    include_uppercase: false,
                    include_symbols: false,
                    include_lowercase: false,
                    ..PasswordOptions::default()
                },
                "23456789",
            ),
            (
                PasswordOptions {
                    include_uppercase: false,
                    include_lowercase: false,
                    include_numbers: false,
                    ..PasswordOptions::default()
                },
                "!@#$%^&*_+-=|:?",
            ),
            (
                PasswordOptions {
                    use_custom_chars: true,
                    custom_chars: "xyz".to_string(),
                    ..PasswordOptions::default()
                },
                "xyz",
            ),
        ];
        for (options, expected) in cases {
            let charset: String = options.charset().into_iter().collect();
            assert_eq!(charset, expected);
        }
    }

    #[test]
    fn test_empty_custom_chars_falls_back_to_classes() {
        let options = PasswordOptions {
            use_custom_chars: true,
            ..PasswordOptions::default()
        };
        assert!(options.charset().len() > 50);
    }

    #[test]
    fn test_empty_charset_is_refused() {
        let options = PasswordOptions {
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
            ..PasswordOptions::default()
        };
        let result = generate_password(&options, &mut StdRng::seed_from_u64(1));
        assert_eq!(result, Err(ToolError::EmptyCharset));
    }

    #[test]
    fn test_length_out_of_range() {
        for length in [0, 3, 129] {
            let options = PasswordOptions {
                length,
                ..PasswordOptions::default()
            };
            assert!(matches!(
                generate_password(&options, &mut StdRng::seed_from_u64(1)),
                Err(ToolError::OutOfRange { name: "length", .. })
            ));
        }
    }

    #[test]
    fn test_all_classes_present_seeded() {
        let options = PasswordOptions {
            exclude_similar: false,
            exclude_ambiguous: false,
            ..PasswordOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let password = generate_password(&options, &mut rng).unwrap();
            assert_eq!(password.chars().count(), 16);
            assert!(has_class(&password, UPPERCASE), "{}", password);
            assert!(has_class(&password, LOWERCASE), "{}", password);
            assert!(has_class(&password, NUMBERS), "{}", password);
            assert!(has_class(&password, SYMBOLS), "{}", password);
        }
    }

    #[test]
    fn test_all_classes_present_thread_rng() {
        let options = PasswordOptions::default();
        let mut rng = crate::utils::secure_rng();
        for _ in 0..1000 {
            let password = generate_password(&options, &mut rng).unwrap();
            assert_eq!(password.chars().count(), 16);
            for class in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
                assert!(has_class(&password, class), "{}", password);
            }
            assert!(!password.chars().any(|c| SIMILAR.contains(c) || AMBIGUOUS.contains(c)));
        }
    }

    #[test]
    fn test_all_classes_present_at_minimum_length() {
        let options = PasswordOptions {
            length: 4,
            ..PasswordOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let password = generate_password(&options, &mut rng).unwrap();
            for class in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
                assert!(has_class(&password, class), "{}", password);
            }
        }
    }

    #[test]
    fn test_generate_passwords() {
        let passwords =
            generate_passwords(5, &PasswordOptions::default(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(passwords.len(), 5);
        assert!(passwords.iter().all(|p| p.chars().count() == 16));
    }

    #[test]
    fn test_analysis_table_driven() {
        let cases = vec![
            ("", Strength::VeryWeak, "Instantly"),
            ("password", Strength::VeryWeak, "1 minutes"),
            ("aaaa", Strength::VeryWeak, "Instantly"),
            ("Xk9#mP2$vL7@nQ4!", Strength::VeryStrong, "Universe lifetime+"),
        ];
        for (password, strength, crack) in cases {
            let analysis = analyze_password(password);
            assert_eq!(analysis.strength, strength, "password: {:?}", password);
            assert_eq!(analysis.time_to_crack, crack, "password: {:?}", password);
            assert!(analysis.score <= 100);
        }
    }

    #[test]
    fn test_analysis_issues() {
        let analysis = analyze_password("admin1234");
        assert!(analysis.issues.contains(&"Contains common sequences".to_string()));
        assert!(analysis.issues.contains(&"Contains common words or patterns".to_string()));
        assert_eq!(analysis.issues.len(), analysis.suggestions.len());

        let repeated = analyze_password("Zzz!!!q");
        assert!(repeated.issues.contains(&"Contains repeated characters".to_string()));
        assert!(repeated.issues.contains(&"Password is too short (less than 8 characters)".to_string()));
    }

    #[test]
    fn test_entropy() {
        // 8 lowercase letters: 8 * log2(26) = 37.6
        assert_eq!(analyze_password("hgfmrtkw").entropy, 37.6);
    }

    #[test]
    fn test_time_to_crack_buckets() {
        assert_eq!(time_to_crack(10, 9), "Instantly");
        assert_eq!(time_to_crack(10, 11), "Less than a minute");
        assert_eq!(time_to_crack(10, 12), "8 minutes");
        assert_eq!(time_to_crack(10, 14), "13 hours");
        assert_eq!(time_to_crack(10, 15), "5 days");
        assert_eq!(time_to_crack(10, 18), "15 years");
        assert_eq!(time_to_crack(10, 21), "15 billion years");
        assert_eq!(time_to_crack(94, 16), "Universe lifetime+");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = PasswordHistory::default();
        for i in 0..12 {
            history.record(&format!("pw-{}", i), i);
        }
        assert_eq!(history.entries().len(), 10);
        assert_eq!(history.entries()[0].password, "pw-11");
        assert_eq!(history.entries()[9].password, "pw-2");
        history.clear();
        assert!(history.entries().is_empty());
    }
}
