// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor backends for The Textkit.
//!
//! Every text tool is exposed as a processor implementing the [`Processor`]
//! trait, so tools can be run one at a time from the CLI or chained in a
//! pipeline built from configuration.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process processors, one per tool:
//! - **Transform**: case conversion, cleaning, slugs, permalinks, codecs,
//!   numeric encodings, JSON formatting, email extraction, generators
//! - **Analyze**: text statistics, keyword density, diffs, speech
//!
//! ## Stub Backend (Test-Only)
//! Processors with fixed behavior for pipeline tests (only available in test builds):
//! - **StubProcessor**: appends a marker, to observe ordering
//! - **InspectorProcessor**: an Analyze processor whose payload must be ignored
//! - **FailingProcessor**: simulates failures for error handling tests
//! - **NoOutcomeProcessor**: tests invalid response scenarios
//!
//! # Architecture
//!
//! ```text
//! Configuration → Factory → Processor Instance → Executor
//! ```
//!
//! # Examples
//!
//! ```rust
//! use the_textkit::backends::local::LocalProcessorFactory;
//! use the_textkit::config::ProcessorConfig;
//!
//! let config = ProcessorConfig {
//!     id: "kebab".to_string(),
//!     impl_: Some("case_converter".to_string()),
//!     options: serde_yaml::from_str("mode: kebab").unwrap(),
//! };
//!
//! let processor = LocalProcessorFactory::create_processor(&config)?;
//! assert_eq!(processor.name(), "case_converter");
//! # Ok::<(), String>(())
//! ```
//!
//! [`Processor`]: crate::traits::Processor

pub mod local;
#[cfg(test)]
pub mod stub;
