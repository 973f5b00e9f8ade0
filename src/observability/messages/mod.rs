// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.

use tracing::Span;

pub mod pipeline;
pub mod processor;
pub mod storage;
pub mod tools;
pub mod validation;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog {
    /// Emit this message as a `tracing` event.
    fn log(&self);

    /// Open a span carrying this message's fields.
    fn span(&self, name: &str) -> Span;
}
