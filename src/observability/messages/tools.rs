// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Advisory events raised by individual text tools.
//!
//! None of these are failures of the crate; they report telemetry or soft
//! conditions the tools recover from on their own.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// JSON formatting finished.
///
/// # Log Level
/// `debug!`
pub struct JsonFormatted {
    pub input_size: usize,
    pub output_size: usize,
    pub is_valid: bool,
    pub duration: std::time::Duration,
}

impl Display for JsonFormatted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "JSON formatted: input={} bytes, output={} bytes, valid={}, duration={:?}",
            self.input_size, self.output_size, self.is_valid, self.duration
        )
    }
}

impl StructuredLog for JsonFormatted {
    fn log(&self) {
        tracing::debug!(
            input_size = self.input_size,
            output_size = self.output_size,
            is_valid = self.is_valid,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("json_formatted", span_name = name, input_size = self.input_size)
    }
}

/// Output exceeded the advisory size limit.
///
/// # Log Level
/// `warn!` - Degraded behavior, processing continues
///
/// # Example
/// ```
/// use the_textkit::observability::messages::tools::LargeOutput;
///
/// let msg = LargeOutput { tool: "json_formatter", size: 2_000_000, limit: 1_048_576 };
/// assert!(msg.to_string().starts_with("json_formatter output is large"));
/// ```
pub struct LargeOutput<'a> {
    pub tool: &'a str,
    pub size: usize,
    pub limit: usize,
}

impl Display for LargeOutput<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} output is large: {} bytes (advisory limit {} bytes)",
            self.tool, self.size, self.limit
        )
    }
}

impl StructuredLog for LargeOutput<'_> {
    fn log(&self) {
        tracing::warn!(tool = self.tool, size = self.size, limit = self.limit, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("large_output", span_name = name, tool = self.tool)
    }
}

/// Text codec could not encode or decode its input.
///
/// # Log Level
/// `debug!` - Malformed user input is expected
pub struct CodecFailed<'a> {
    pub scheme: &'a str,
    pub direction: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CodecFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} failed: {}", self.scheme, self.direction, self.error)
    }
}

impl StructuredLog for CodecFailed<'_> {
    fn log(&self) {
        tracing::debug!(
            scheme = self.scheme,
            direction = self.direction,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "codec_failed",
            span_name = name,
            scheme = self.scheme,
            direction = self.direction,
        )
    }
}

/// Password generated. Never carries the password itself.
///
/// # Log Level
/// `debug!`
pub struct PasswordGenerated<'a> {
    pub length: usize,
    pub charset_size: usize,
    pub strength: &'a str,
}

impl Display for PasswordGenerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Password generated: length={}, charset_size={}, strength={}",
            self.length, self.charset_size, self.strength
        )
    }
}

impl StructuredLog for PasswordGenerated<'_> {
    fn log(&self) {
        tracing::debug!(
            length = self.length,
            charset_size = self.charset_size,
            strength = self.strength,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("password_generated", span_name = name, length = self.length)
    }
}

/// The speech engine reported a lifecycle event.
///
/// # Log Level
/// `debug!`, or `warn!` for engine errors
pub struct SpeechEventReceived<'a> {
    pub event: &'a str,
    pub detail: Option<&'a str>,
}

impl Display for SpeechEventReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.detail {
            Some(detail) => write!(f, "Speech event '{}': {}", self.event, detail),
            None => write!(f, "Speech event '{}'", self.event),
        }
    }
}

impl StructuredLog for SpeechEventReceived<'_> {
    fn log(&self) {
        if self.detail.is_some() {
            tracing::warn!(event = self.event, detail = self.detail, "{}", self);
        } else {
            tracing::debug!(event = self.event, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("speech_event", span_name = name, event = self.event)
    }
}
