// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{CapabilityError, CodecError, ToolError};

/// Why a processor answered with an error outcome.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Invalid UTF-8 input: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The tool ran but rejected the input, e.g. malformed JSON.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProcessorError {
    /// 400 for bad input or options, 500 for internal failures.
    pub fn code(&self) -> i32 {
        match self {
            ProcessorError::InvalidUtf8(_)
            | ProcessorError::Tool(_)
            | ProcessorError::Codec(_)
            | ProcessorError::Rejected(_) => 400,
            ProcessorError::Capability(CapabilityError::Input(_)) => 400,
            ProcessorError::Capability(_) | ProcessorError::Serialize(_) => 500,
        }
    }
}
