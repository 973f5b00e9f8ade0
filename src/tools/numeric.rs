// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text to binary, hexadecimal, octal and decimal code listings.
//!
//! Conversion works per Unicode code point.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ToolError;

pub const MIN_CUSTOM_BITS: u32 = 1;
pub const MAX_CUSTOM_BITS: u32 = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Binary,
    Hex,
    Octal,
    Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryFormat {
    #[default]
    #[serde(rename = "8bit")]
    EightBit,
    #[serde(rename = "7bit")]
    SevenBit,
    #[serde(rename = "custom")]
    Custom,
}

impl BinaryFormat {
    fn as_str(self) -> &'static str {
        match self {
            BinaryFormat::EightBit => "8bit",
            BinaryFormat::SevenBit => "7bit",
            BinaryFormat::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    #[default]
    Uppercase,
    Lowercase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    None,
    #[default]
    Space,
    Comma,
    Newline,
}

impl Spacing {
    pub fn token(self) -> &'static str {
        match self {
            Spacing::None => "",
            Spacing::Space => " ",
            Spacing::Comma => ", ",
            Spacing::Newline => "\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericOptions {
    pub format: OutputFormat,
    pub binary_format: BinaryFormat,
    /// Used when `binary_format` is `custom`.
    pub custom_bits: u32,
    pub hex_case: HexCase,
    pub spacing: Spacing,
}

impl Default for NumericOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Binary,
            binary_format: BinaryFormat::EightBit,
            custom_bits: 8,
            hex_case: HexCase::Uppercase,
            spacing: Spacing::Space,
        }
    }
}

impl NumericOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        if !(MIN_CUSTOM_BITS..=MAX_CUSTOM_BITS).contains(&self.custom_bits) {
            return Err(ToolError::OutOfRange {
                name: "custom_bits",
                min: MIN_CUSTOM_BITS as usize,
                max: MAX_CUSTOM_BITS as usize,
                actual: self.custom_bits as usize,
            });
        }
        Ok(())
    }

    fn bit_width(&self) -> usize {
        match self.binary_format {
            BinaryFormat::EightBit => 8,
            BinaryFormat::SevenBit => 7,
            BinaryFormat::Custom => self.custom_bits as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterInfo {
    /// The character, with a space shown as `␣`.
    pub display: String,
    pub ascii: u32,
    pub unicode: u32,
    pub binary: String,
    pub hex: String,
    pub octal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub binary: String,
    /// Without the `0x` prefix.
    pub hex: String,
    pub octal: String,
    pub decimal: String,
    pub character_breakdown: Vec<CharacterInfo>,
}

impl ConversionResult {
    /// The listing for `format`; hex carries a single `0x` prefix.
    pub fn output(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Binary => self.binary.clone(),
            OutputFormat::Hex if self.hex.is_empty() => String::new(),
            OutputFormat::Hex => format!("0x{}", self.hex),
            OutputFormat::Octal => self.octal.clone(),
            OutputFormat::Decimal => self.decimal.clone(),
        }
    }

    pub fn all_formats(&self) -> String {
        format!(
            "Binary: {}\nHexadecimal: 0x{}\nOctal: {}\nDecimal: {}",
            self.binary, self.hex, self.octal, self.decimal
        )
    }
}

/// Binary digits of `code` fitted to exactly `width` digits: zero padded, or
/// keeping the low-order digits when too long.
fn fixed_width_binary(code: u32, width: usize) -> String {
    let digits = format!("{:0width$b}", code, width = width);
    digits[digits.len() - width..].to_string()
}

fn even_width_hex(code: u32, case: HexCase) -> String {
    let mut hex = match case {
        HexCase::Uppercase => format!("{:X}", code),
        HexCase::Lowercase => format!("{:x}", code),
    };
    if hex.len() % 2 != 0 {
        hex.insert(0, '0');
    }
    hex
}

fn breakdown(c: char) -> CharacterInfo {
    let code = u32::from(c);
    CharacterInfo {
        display: if c == ' ' { "␣".to_string() } else { c.to_string() },
        ascii: code,
        unicode: code,
        binary: format!("{:08b}", code),
        hex: format!("{:02X}", code),
        octal: format!("{:o}", code),
    }
}

/// All four listings plus the per-character breakdown. Blank input converts to
/// an empty result.
pub fn convert(text: &str, options: &NumericOptions) -> ConversionResult {
    if text.trim().is_empty() {
        return ConversionResult::default();
    }

    let separator = options.spacing.token();
    let width = options.bit_width();
    let codes: Vec<u32> = text.chars().map(u32::from).collect();
    let listing = |render: &dyn Fn(u32) -> String| {
        codes.iter().map(|c| render(*c)).collect::<Vec<_>>().join(separator)
    };

    ConversionResult {
        binary: listing(&|c| fixed_width_binary(c, width)),
        hex: listing(&|c| even_width_hex(c, options.hex_case)),
        octal: listing(&|c| format!("{:o}", c)),
        decimal: listing(&|c| c.to_string()),
        character_breakdown: text.chars().map(breakdown).collect(),
    }
}

/// Plain-text report for download.
pub fn render_report(
    text: &str,
    options: &NumericOptions,
    result: &ConversionResult,
    now: &DateTime<Local>,
) -> String {
    let mut report = format!(
        "Text to Binary/Hex Conversion Results\n\
         =====================================\n\n\
         Original Text: \"{}\"\n\n\
         Conversion Results:\n\
         ------------------\n\
         Binary ({}): {}\n\
         Hexadecimal: 0x{}\n\
         Octal: {}\n\
         Decimal: {}\n\n\
         Character Breakdown:\n\
         -------------------",
        text,
        options.binary_format.as_str(),
        result.binary,
        result.hex,
        result.octal,
        result.decimal
    );
    for info in &result.character_breakdown {
        report.push_str(&format!(
            "\nCharacter: \"{}\"\nASCII: {}\nUnicode: {}\nBinary: {}\nHex: 0x{}\nOctal: {}",
            info.display, info.ascii, info.unicode, info.binary, info.hex, info.octal
        ));
    }
    report.push_str(&format!("\n\nGenerated on: {}", now.format("%Y-%m-%d %H:%M:%S")));
    report
}

pub fn report_filename(now: &DateTime<Local>) -> String {
    format!("text-conversion-{}.txt", now.with_timezone(&Utc).format("%Y-%m-%d"))
}
