// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for the text tools.
//!
//! Tools are total over their text input; errors only come from option
//! validation (`ToolError`) and from decoding malformed input (`CodecError`).

use thiserror::Error;

/// Option validation failures and refused operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Password generation was asked to draw from an empty character set.
    #[error("No character set available. Please enable at least one character type.")]
    EmptyCharset,

    /// A numeric option fell outside its allowed range.
    #[error("{name} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        name: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// An option value is not one of the accepted choices.
    #[error("Invalid value for {name}: {value}")]
    InvalidChoice { name: &'static str, value: String },

    /// The operation needs non-blank text.
    #[error("Please enter some text to {action}")]
    EmptyInput { action: &'static str },
}

/// Encoding and decoding failures of the text codec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// The input is not valid base64.
    #[error("Invalid base64 input: {0}")]
    InvalidBase64(String),

    /// A `%` escape is truncated or not followed by two hex digits.
    #[error("Malformed percent escape at byte {position}")]
    MalformedPercentEscape { position: usize },

    /// The decoded bytes are not valid UTF-8.
    #[error("Decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(String),
}
