// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{Config, ProcessorMap};
use crate::engine::ChainExecutor;
use crate::errors::{FailureStrategy, ProcessorMapError};
use crate::traits::PipelineExecutor;

/// Pipeline runtime builder - creates the processor map and executor from configuration.
///
/// # Examples
///
/// ```
/// use the_textkit::config::{parse_config, RuntimeBuilder};
/// use the_textkit::errors::FailureStrategy;
///
/// let config = parse_config("processors:\n  - {id: stats, impl_: text_stats}").unwrap();
/// let (processors, _executor, failure_strategy) = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(processors.len(), 1);
/// assert_eq!(failure_strategy, FailureStrategy::FailFast);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the pipeline runtime from configuration.
    ///
    /// Creates and returns:
    /// - `ProcessorMap`: every configured processor, in declaration order
    /// - `Box<dyn PipelineExecutor>`: the sequential chain executor
    /// - `FailureStrategy`: how to handle processor failures
    pub fn from_config(
        cfg: &Config,
    ) -> Result<(ProcessorMap, Box<dyn PipelineExecutor>, FailureStrategy), ProcessorMapError> {
        let processors = ProcessorMap::from_config(cfg)?;
        let executor: Box<dyn PipelineExecutor> = Box::new(ChainExecutor::new());
        Ok((processors, executor, cfg.failure_strategy))
    }
}
