// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON validation, pretty-printing and minification.
//!
//! Object key order is preserved (`serde_json` is built with `preserve_order`).
//! Numbers go through `f64`/`i64`/`u64`, so `1.0` stays `1.0` and integers wider
//! than 64 bits lose precision.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::time::{Duration, Instant};

use crate::errors::ToolError;
use crate::observability::messages::tools::{JsonFormatted, LargeOutput};
use crate::observability::messages::StructuredLog;

/// Serialized output above this size triggers an advisory warning.
pub const LARGE_OUTPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IndentSize {
    #[default]
    Two,
    Four,
    Six,
    Eight,
}

impl IndentSize {
    pub fn spaces(self) -> usize {
        match self {
            IndentSize::Two => 2,
            IndentSize::Four => 4,
            IndentSize::Six => 6,
            IndentSize::Eight => 8,
        }
    }
}

impl TryFrom<u8> for IndentSize {
    type Error = ToolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(IndentSize::Two),
            4 => Ok(IndentSize::Four),
            6 => Ok(IndentSize::Six),
            8 => Ok(IndentSize::Eight),
            other => Err(ToolError::InvalidChoice {
                name: "indent_size",
                value: other.to_string(),
            }),
        }
    }
}

impl From<IndentSize> for u8 {
    fn from(size: IndentSize) -> Self {
        size.spaces() as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatOptions {
    pub indent_size: IndentSize,
    pub minify: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JsonFormatReport {
    pub output: String,
    pub is_valid: bool,
    /// Parser message, verbatim, when the input is not valid JSON.
    pub error_message: Option<String>,
    /// Set when the output is larger than [`LARGE_OUTPUT_BYTES`].
    pub warning: Option<String>,
    pub processing_time: Duration,
}

pub fn format_json(input: &str, options: &JsonFormatOptions) -> JsonFormatReport {
    let started = Instant::now();
    let mut report = render(input, options);
    report.processing_time = started.elapsed();

    if report.output.len() > LARGE_OUTPUT_BYTES {
        LargeOutput {
            tool: "json_formatter",
            size: report.output.len(),
            limit: LARGE_OUTPUT_BYTES,
        }
        .log();
        report.warning = Some(format!(
            "Large output ({:.1} MB). Formatting may be slow to display.",
            report.output.len() as f64 / LARGE_OUTPUT_BYTES as f64
        ));
    }

    JsonFormatted {
        input_size: input.len(),
        output_size: report.output.len(),
        is_valid: report.is_valid,
        duration: report.processing_time,
    }
    .log();

    report
}

fn render(input: &str, options: &JsonFormatOptions) -> JsonFormatReport {
    if input.trim().is_empty() {
        return JsonFormatReport {
            is_valid: true,
            ..JsonFormatReport::default()
        };
    }

    let value: serde_json::Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(e) => return invalid(e.to_string()),
    };

    let serialized = if options.minify {
        serde_json::to_string(&value).map_err(|e| e.to_string())
    } else {
        pretty(&value, options.indent_size.spaces())
    };

    match serialized {
        Ok(output) => JsonFormatReport {
            output,
            is_valid: true,
            ..JsonFormatReport::default()
        },
        Err(message) => invalid(message),
    }
}

fn pretty(value: &serde_json::Value, spaces: usize) -> Result<String, String> {
    let indent = " ".repeat(spaces);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer).map_err(|e| e.to_string())?;
    String::from_utf8(buffer).map_err(|e| e.to_string())
}

fn invalid(message: String) -> JsonFormatReport {
    JsonFormatReport {
        is_valid: false,
        error_message: Some(message),
        ..JsonFormatReport::default()
    }
}
