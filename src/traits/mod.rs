// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod processor;

pub use crate::config::ProcessorMap;
pub use executor::{PipelineExecutor, PipelineOutput};
pub use processor::{Processor, ProcessorIntent};
