// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{run_tool, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::tools::text_stats::{analyze, render_report, TextStatistics};
use crate::traits::{processor::ProcessorIntent, Processor};

pub const REPORT_FILENAME: &str = "text-analysis.txt";

/// Text Stats processor - word counts and readability scores as metadata
pub struct TextStatsProcessor;

impl TextStatsProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl TextStatsProcessor {
    fn report(stats: &TextStatistics) -> ToolRun {
        let words = |list: &[String]| list.join(", ");
        let mut run = ToolRun::analyzed()
            .with("words", stats.words)
            .with("characters", stats.characters)
            .with("characters_no_spaces", stats.characters_no_spaces)
            .with("sentences", stats.sentences)
            .with("paragraphs", stats.paragraphs)
            .with("lines", stats.lines)
            .with("reading_time_minutes", stats.reading_time_minutes)
            .with("speaking_time_minutes", stats.speaking_time_minutes)
            .with("average_word_length", format!("{:.1}", stats.average_word_length))
            .with("longest_word", &stats.longest_word)
            .with("average_words_per_sentence", format!("{:.1}", stats.average_words_per_sentence))
            .with("syllables", stats.syllables)
            .with("average_syllables_per_word", format!("{:.1}", stats.average_syllables_per_word))
            .with("complex_words", stats.complex_words)
            .with("flesch_reading_ease", format!("{:.1}", stats.flesch_reading_ease))
            .with("flesch_kincaid_grade", format!("{:.1}", stats.flesch_kincaid_grade))
            .with("gunning_fog", format!("{:.1}", stats.gunning_fog))
            .with("unique_words", stats.unique_words)
            .with("vocabulary_richness", format!("{:.1}", stats.vocabulary_richness))
            .with("repetition_rate", format!("{:.1}", stats.repetition_rate))
            .with("longest_words", words(&stats.longest_words))
            .with("shortest_words", words(&stats.shortest_words))
            .with("language", format!("{:?}", stats.language));

        let top_words = stats
            .top_words
            .iter()
            .map(|w| format!("{}:{}:{:.1}", w.word, w.count, w.percentage))
            .collect::<Vec<_>>()
            .join(", ");
        run = run.with("top_words", top_words);

        // remaining characters; negative once over the limit
        for limit in &stats.social_limits {
            run = run.with(&format!("{}_remaining", limit.platform), limit.remaining);
        }
        run
    }
}

impl Default for TextStatsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Processor for TextStatsProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        run_tool(self.name(), req, |input| Ok(Self::report(&analyze(input))))
    }

    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        Ok(Some(Download::text(REPORT_FILENAME, render_report(&analyze(input)))))
    }

    fn name(&self) -> &'static str {
        "text_stats"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}
