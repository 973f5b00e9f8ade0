// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for local stores and the clipboard/download capabilities.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A stored value could not be parsed and was treated as empty.
///
/// # Log Level
/// `warn!` - Data was discarded
///
/// # Example
/// ```
/// use the_textkit::observability::messages::storage::StoredValueUnreadable;
///
/// let msg = StoredValueUnreadable { key: "password-history", reason: "expected value" };
/// assert_eq!(
///     msg.to_string(),
///     "Stored value for 'password-history' is unreadable, treating as empty: expected value"
/// );
/// ```
pub struct StoredValueUnreadable<'a> {
    pub key: &'a str,
    pub reason: &'a str,
}

impl Display for StoredValueUnreadable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stored value for '{}' is unreadable, treating as empty: {}",
            self.key, self.reason
        )
    }
}

impl StructuredLog for StoredValueUnreadable<'_> {
    fn log(&self) {
        tracing::warn!(key = self.key, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("stored_value_unreadable", span_name = name, key = self.key)
    }
}

/// A value could not be written; the change is kept in memory only.
///
/// # Log Level
/// `warn!`
pub struct StoredValueUnwritable<'a> {
    pub key: &'a str,
    pub reason: &'a str,
}

impl Display for StoredValueUnwritable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to write stored value for '{}', keeping it in memory: {}",
            self.key, self.reason
        )
    }
}

impl StructuredLog for StoredValueUnwritable<'_> {
    fn log(&self) {
        tracing::warn!(key = self.key, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("stored_value_unwritable", span_name = name, key = self.key)
    }
}

/// Entries dropped from a bounded list to make room.
///
/// # Log Level
/// `debug!`
pub struct EntriesEvicted<'a> {
    pub key: &'a str,
    pub evicted: usize,
    pub capacity: usize,
}

impl Display for EntriesEvicted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evicted {} entries from '{}' (capacity {})",
            self.evicted, self.key, self.capacity
        )
    }
}

impl StructuredLog for EntriesEvicted<'_> {
    fn log(&self) {
        tracing::debug!(
            key = self.key,
            evicted = self.evicted,
            capacity = self.capacity,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("entries_evicted", span_name = name, key = self.key)
    }
}

/// Writing to the clipboard failed; the user gets a notification instead.
///
/// # Log Level
/// `warn!`
pub struct ClipboardWriteFailed<'a> {
    pub reason: &'a str,
}

impl Display for ClipboardWriteFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Clipboard write failed: {}", self.reason)
    }
}

impl StructuredLog for ClipboardWriteFailed<'_> {
    fn log(&self) {
        tracing::warn!(reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("clipboard_write_failed", span_name = name)
    }
}

/// A download was written by a sink.
///
/// # Log Level
/// `info!`
pub struct DownloadWritten<'a> {
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub size: usize,
}

impl Display for DownloadWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Download '{}' written: {} bytes ({})",
            self.filename, self.size, self.mime_type
        )
    }
}

impl StructuredLog for DownloadWritten<'_> {
    fn log(&self) {
        tracing::info!(
            filename = self.filename,
            mime_type = self.mime_type,
            size = self.size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("download_written", span_name = name, filename = self.filename)
    }
}
