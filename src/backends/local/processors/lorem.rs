// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ToolError;
use crate::tools::lorem::{generate, LoremOptions};
use crate::traits::Processor;
use crate::utils::cosmetic_rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoremProcessorOptions {
    #[serde(flatten)]
    pub lorem: LoremOptions,
    /// Fixed seed for reproducible output; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl LoremProcessorOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        self.lorem.validate()
    }
}

/// Lorem Ipsum processor - replaces the payload with placeholder text
pub struct LoremProcessor {
    options: LoremProcessorOptions,
}

impl LoremProcessor {
    pub fn new(options: LoremProcessorOptions) -> Self {
        Self { options }
    }

    fn rng(&self) -> SmallRng {
        match self.options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => cosmetic_rng(),
        }
    }
}

#[async_trait]
impl Processor for LoremProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |_| {
            let text = generate(&self.options.lorem, &mut self.rng());
            Ok(ToolRun::transformed(text))
        })
    }

    fn name(&self) -> &'static str {
        "lorem"
    }
}
