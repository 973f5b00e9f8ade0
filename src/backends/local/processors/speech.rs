// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::Instrument;

use super::{respond, ToolRun};
use crate::capabilities::Download;
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ProcessorError;
use crate::observability::messages::{processor::*, StructuredLog};
use crate::storage::{HistoryStore, SPEECH_HISTORY_KEY};
use crate::tools::speech::{
    export_filename, remember_spoken, SpeechController, SpeechEvent, TranscriptSpeechEngine, Voice,
    VoiceSettings,
};
use crate::traits::{processor::ProcessorIntent, Processor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechProcessorOptions {
    #[serde(flatten)]
    pub settings: VoiceSettings,
    pub muted: bool,
}

/// Speech processor - hands the payload to a speech engine as an utterance
///
/// The built-in engine records utterances rather than producing audio, so the
/// processor reports what would be spoken and leaves the payload alone.
pub struct SpeechProcessor {
    controller: Mutex<SpeechController<TranscriptSpeechEngine>>,
    store: Option<HistoryStore>,
}

impl SpeechProcessor {
    pub fn new(options: SpeechProcessorOptions) -> Self {
        let engine = TranscriptSpeechEngine::new(vec![
            Voice::new("Transcript (US)", "en-US", true),
            Voice::new("Transcript (GB)", "en-GB", false),
        ]);
        let mut controller = SpeechController::with_settings(engine, options.settings);
        controller.set_muted(options.muted);
        Self {
            controller: Mutex::new(controller),
            store: None,
        }
    }

    /// Persist the spoken texts in `store` under the speech history key.
    pub fn with_history_store(mut self, store: HistoryStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Texts spoken so far, newest first.
    pub async fn history(&self) -> Vec<String> {
        self.controller.lock().await.history().to_vec()
    }

    async fn speak(&self, input: &str) -> Result<ToolRun, ProcessorError> {
        let mut controller = self.controller.lock().await;
        if controller.voices().is_empty() {
            controller.load_voices().await;
        }

        let duration = controller.play(input).await?;
        controller.handle_event(SpeechEvent::Start);
        if let Some(store) = &self.store {
            let history = store
                .update(SPEECH_HISTORY_KEY, |history| remember_spoken(history, input.trim()))
                .await;
            controller.restore_history(history);
        }

        let settings = controller.settings();
        let mut run = ToolRun::analyzed()
            .with("estimated_duration_ms", duration.as_millis())
            .with("rate", settings.rate)
            .with("pitch", settings.pitch)
            .with("language", &settings.language)
            .with("muted", controller.is_muted());
        if let Some(voice) = &settings.voice {
            run = run.with("voice", voice);
        }
        Ok(run)
    }
}

#[async_trait]
impl Processor for SpeechProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let start_msg = ProcessorExecutionStarted {
            processor_id: self.name(),
            input_size: req.payload.len(),
        };
        let span = start_msg.span("processor_execution");
        let input_size = start_msg.input_size;

        async move {
            start_msg.log();
            let start_time = Instant::now();

            let result = match String::from_utf8(req.payload) {
                Ok(input) => self.speak(&input).await.map(|run| (input, run)),
                Err(e) => Err(e.into()),
            };

            respond(self.name(), input_size, start_time.elapsed(), result)
        }
        .instrument(span)
        .await
    }

    /// The text with the current voice settings, as the JSON export document.
    async fn export(&self, input: &str) -> Result<Option<Download>, ProcessorError> {
        let mut controller = self.controller.lock().await;
        if controller.voices().is_empty() {
            controller.load_voices().await;
        }
        let now = Utc::now();
        let document = controller.export_settings(input, &now)?;
        Ok(Some(Download::json(export_filename(&now), document)))
    }

    fn name(&self) -> &'static str {
        "speech"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}
