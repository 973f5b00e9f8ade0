// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Request/response envelope exchanged between the pipeline and its processors.
//!
//! A processor receives the current payload (UTF-8 text as bytes) together with the
//! metadata accumulated so far, and answers with an [`Outcome`] plus any metadata it
//! wants to contribute under its own name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input handed to a processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorRequest {
    pub payload: Vec<u8>,
    #[serde(default)]
    pub metadata: Option<PipelineMetadata>,
}

impl ProcessorRequest {
    /// Build a request carrying `text` and no metadata.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            payload: text.into().into_bytes(),
            metadata: None,
        }
    }
}

/// What a processor hands back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub metadata: Option<PipelineMetadata>,
}

impl ProcessorResponse {
    pub fn next_payload(payload: Vec<u8>, metadata: Option<PipelineMetadata>) -> Self {
        Self {
            outcome: Some(Outcome::NextPayload(payload)),
            metadata,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            outcome: Some(Outcome::Error(ErrorDetail {
                code,
                message: message.into(),
            })),
            metadata: None,
        }
    }

    /// The payload decoded as text, if the outcome is a payload of valid UTF-8.
    pub fn payload_text(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::NextPayload(bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Error(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NextPayload(Vec<u8>),
    Error(ErrorDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// 400 for rejected input or options, 500 for internal failures.
    pub code: i32,
    pub message: String,
}

/// Key/value pairs contributed by one processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorMetadata {
    pub metadata: BTreeMap<String, String>,
}

/// Metadata for a whole pipeline run, keyed by processor id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub metadata: BTreeMap<String, ProcessorMetadata>,
}

impl PipelineMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata holding a single processor's key/value pairs.
    pub fn for_processor<I, K, V>(processor_name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut metadata = Self::new();
        for (key, value) in entries {
            metadata.add_metadata(processor_name, &key.into(), &value.into());
        }
        metadata
    }

    pub fn add_metadata(&mut self, processor_name: &str, key: &str, value: &str) {
        self.metadata
            .entry(processor_name.to_string())
            .or_default()
            .metadata
            .insert(key.to_string(), value.to_string());
    }

    pub fn merge_processor_metadata(
        &mut self,
        processor_name: &str,
        processor_metadata: &ProcessorMetadata,
    ) {
        for (key, value) in &processor_metadata.metadata {
            self.add_metadata(processor_name, key, value);
        }
    }

    /// Fold a response's metadata in.
    ///
    /// Entries a processor reports under its own implementation name are filed under
    /// `processor_id` instead, so two instances of the same tool stay apart.
    pub fn merge_processor_response(
        &mut self,
        processor_id: &str,
        processor_name: &str,
        response: &ProcessorResponse,
    ) {
        if let Some(response_metadata) = &response.metadata {
            for (name, entries) in &response_metadata.metadata {
                let target = if name == processor_name { processor_id } else { name };
                self.merge_processor_metadata(target, entries);
            }
        }
    }

    pub fn get_processor_metadata(&self, processor_name: &str) -> Option<&ProcessorMetadata> {
        self.metadata.get(processor_name)
    }

    pub fn get_metadata_value(&self, processor_name: &str, key: &str) -> Option<&str> {
        self.metadata
            .get(processor_name)?
            .metadata
            .get(key)
            .map(|s| s.as_str())
    }

    pub fn list_processors(&self) -> Vec<&str> {
        self.metadata.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}
