// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All log text in the crate lives in message structs under [`messages`]. Each
//! message implements `Display` for the human-readable line and
//! [`messages::StructuredLog`] to emit a `tracing` event with structured fields at
//! its documented level.
//!
//! Messages are organized by subsystem:
//! * `messages::processor` - processor execution and instantiation
//! * `messages::pipeline` - chain executor lifecycle
//! * `messages::validation` - configuration validation
//! * `messages::tools` - advisory events raised by individual text tools
//! * `messages::storage` - stores and external capabilities (clipboard, download)
//!
//! # Usage
//!
//! ```rust
//! use the_textkit::observability::messages::processor::ProcessorExecutionFailed;
//! use the_textkit::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! ProcessorExecutionFailed {
//!     processor_id: "case_converter",
//!     error: &error,
//! }
//! .log();
//! ```
//!
//! The CLI installs a `tracing_subscriber` fmt layer filtered by `RUST_LOG`; library
//! users bring their own subscriber.

pub mod messages;
