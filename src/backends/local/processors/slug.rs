// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::tools::slug::{slugify, SlugOptions};
use crate::traits::Processor;

pub struct SlugProcessor {
    options: SlugOptions,
}

impl SlugProcessor {
    pub fn new(options: SlugOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Processor for SlugProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| {
            let slug = slugify(input, &self.options);
            let length = slug.chars().count();
            Ok(ToolRun::transformed(slug).with("length", length))
        })
    }

    fn name(&self) -> &'static str {
        "slug"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::permalink::Separator;

    #[tokio::test]
    async fn test_slug_options() {
        let cases = vec![
            (SlugOptions::default(), "Hello, World! It's me", "hello-world-its-me"),
            (
                SlugOptions {
                    separator: Separator::Underscore,
                    remove_stop_words: true,
                    ..SlugOptions::default()
                },
                "The Art of War",
                "art_war",
            ),
        ];

        for (options, input, expected) in cases {
            let response = SlugProcessor::new(options)
                .process(ProcessorRequest::from_text(input))
                .await;
            assert_eq!(response.payload_text(), Some(expected));
            assert_eq!(
                response.metadata.unwrap().get_metadata_value("slug", "length"),
                Some(expected.len().to_string().as_str())
            );
        }
    }
}
