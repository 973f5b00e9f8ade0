// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::{DateTime, Local};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::{ProcessorError, ToolError};
use crate::tools::permalink::{
    export_filename, export_json, generate_permalink, generate_variations, score,
    validate_permalink, PermalinkOptions,
};
use crate::traits::Processor;
use crate::utils::cosmetic_rng;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkProcessorOptions {
    #[serde(flatten)]
    pub permalink: PermalinkOptions,
    pub seed: Option<u64>,
}

impl PermalinkProcessorOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        self.permalink.validate()
    }
}

/// Permalink processor - turns a title into a permalink with the configured strategy
pub struct PermalinkProcessor {
    options: PermalinkProcessorOptions,
    clock: fn() -> DateTime<Local>,
}

impl PermalinkProcessor {
    pub fn new(options: PermalinkProcessorOptions) -> Self {
        Self {
            options,
            clock: Local::now,
        }
    }

    /// Use a fixed clock instead of the wall clock.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    fn rng(&self) -> SmallRng {
        match self.options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => cosmetic_rng(),
        }
    }
}

#[async_trait]
impl Processor for PermalinkProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let options = &self.options.permalink;
            let permalink = generate_permalink(
                input,
                options.strategy,
                options,
                &(self.clock)(),
                &mut self.rng(),
            );
            let scores = score(&permalink, options.separator);
            let validation = validate_permalink(&permalink, options.separator);

            Ok(ToolRun::transformed(permalink)
                .with("strategy", options.strategy.display_name())
                .with("seo_score", format!("{:.0}", scores.seo_score))
                .with("uniqueness", format!("{:.0}", scores.uniqueness))
                .with("readability", format!("{:.0}", scores.readability))
                .with("is_valid", validation.is_valid)
                .with("issues", validation.issues.join("; ")))
        })
    }

    /// Every strategy's permalink with its scores, as the JSON export document.
    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let now = (self.clock)();
        let variations = generate_variations(input, &self.options.permalink, &now, &mut self.rng());
        let document = export_json(input, &variations, &now)?;
        Ok(Some(Download::json(export_filename(&now), document)))
    }

    fn name(&self) -> &'static str {
        "permalink"
    }
}
