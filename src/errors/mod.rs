// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod capability;
mod config;
mod execution;
mod processor;
mod processor_map;
mod store;
mod tool;

pub use capability::CapabilityError;
pub use config::{ConfigError, ValidationError};
pub use execution::{ExecutionError, FailureStrategy};
pub use processor::ProcessorError;
pub use processor_map::ProcessorMapError;
pub use store::StoreError;
pub use tool::{CodecError, ToolError};
