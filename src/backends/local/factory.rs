// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::sync::Arc;

use super::processors::*;
use crate::config::ProcessorConfig;
use crate::storage::HistoryStore;
use crate::traits::Processor;

/// Factory for creating local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from configuration
    ///
    /// The `impl_` field selects the tool; `options` is deserialized into that
    /// tool's option struct and validated. Missing options take their defaults.
    pub fn create_processor(config: &ProcessorConfig) -> Result<Arc<dyn Processor>, String> {
        Self::create_processor_with_history(config, None)
    }

    /// Like [`create_processor`](Self::create_processor), but processors that
    /// keep a history (password, speech) persist it in `history`.
    pub fn create_processor_with_history(
        config: &ProcessorConfig,
        history: Option<&HistoryStore>,
    ) -> Result<Arc<dyn Processor>, String> {
        let impl_name = config
            .impl_
            .as_ref()
            .ok_or_else(|| format!("Local processor '{}' missing 'impl_' field", config.id))?;

        match impl_name.as_str() {
            "case_converter" => Ok(Arc::new(CaseConverterProcessor::new(parse_options(config)?))),
            "text_stats" => Ok(Arc::new(TextStatsProcessor::new())),
            "text_diff" => Ok(Arc::new(TextDiffProcessor::new(parse_options(config)?))),
            "json_formatter" => Ok(Arc::new(JsonFormatterProcessor::new(parse_options(config)?))),
            "text_cleaner" => Ok(Arc::new(TextCleanerProcessor::new(parse_options(config)?))),
            "keyword_density" => {
                Ok(Arc::new(KeywordDensityProcessor::new(parse_options(config)?)))
            }
            "email_extractor" => {
                Ok(Arc::new(EmailExtractorProcessor::new(parse_options(config)?)))
            }
            "codec" => Ok(Arc::new(CodecProcessor::new(parse_options(config)?))),
            "speech" => {
                let mut processor = SpeechProcessor::new(parse_options(config)?);
                if let Some(history) = history {
                    processor = processor.with_history_store(history.clone());
                }
                Ok(Arc::new(processor))
            }

            // Option structs with range checks
            "lorem" => {
                let options: lorem::LoremProcessorOptions = parse_options(config)?;
                check(config, options.validate())?;
                Ok(Arc::new(LoremProcessor::new(options)))
            }
            "slug" => {
                let options: crate::tools::slug::SlugOptions = parse_options(config)?;
                check(config, options.validate())?;
                Ok(Arc::new(SlugProcessor::new(options)))
            }
            "permalink" => {
                let options: permalink::PermalinkProcessorOptions = parse_options(config)?;
                check(config, options.validate())?;
                Ok(Arc::new(PermalinkProcessor::new(options)))
            }
            "password" => {
                let options: password::PasswordProcessorOptions = parse_options(config)?;
                check(config, options.validate())?;
                let mut processor = PasswordProcessor::new(options);
                if let Some(history) = history {
                    processor = processor.with_history_store(history.clone());
                }
                Ok(Arc::new(processor))
            }
            "numeric" => {
                let options: crate::tools::numeric::NumericOptions = parse_options(config)?;
                check(config, options.validate())?;
                Ok(Arc::new(NumericProcessor::new(options)))
            }

            _ => Err(format!("Unknown local processor implementation: '{}'", impl_name)),
        }
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "case_converter",
            "codec",
            "email_extractor",
            "json_formatter",
            "keyword_density",
            "lorem",
            "numeric",
            "password",
            "permalink",
            "slug",
            "speech",
            "text_cleaner",
            "text_diff",
            "text_stats",
        ]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(impl_name: &str) -> bool {
        Self::list_available_implementations().contains(&impl_name)
    }
}

fn parse_options<T: DeserializeOwned>(config: &ProcessorConfig) -> Result<T, String> {
    serde_yaml::from_value(serde_yaml::Value::Mapping(config.options.clone()))
        .map_err(|e| format!("Invalid options for processor '{}': {}", config.id, e))
}

fn check<E: Display>(config: &ProcessorConfig, result: Result<(), E>) -> Result<(), String> {
    result.map_err(|e| format!("Invalid options for processor '{}': {}", config.id, e))
}
