// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text-to-speech control over an external speech engine.
//!
//! The engine (a browser synthesizer, an OS voice service) is a capability
//! behind [`SpeechEngine`]. [`SpeechController`] prepares utterances, tracks
//! playback state from engine events and keeps the speech history.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::errors::{CapabilityError, ToolError};
use crate::observability::messages::tools::SpeechEventReceived;
use crate::observability::messages::StructuredLog;
use crate::storage::BoundedList;

/// Characters spoken per second, for duration estimates.
const CHARACTERS_PER_SECOND: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag such as `en-US`.
    pub lang: String,
    #[serde(default)]
    pub default: bool,
}

impl Voice {
    pub fn new(name: &str, lang: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            lang: lang.to_string(),
            default,
        }
    }

    fn is_english(&self) -> bool {
        self.lang.starts_with("en")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Voice name; `None` lets the engine choose.
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub language: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            language: "en-US".to_string(),
        }
    }
}

impl VoiceSettings {
    /// Rate into 0.5–2, pitch into 0–2, volume into 0–1.
    pub fn clamped(mut self) -> Self {
        self.rate = self.rate.clamp(0.5, 2.0);
        self.pitch = self.pitch.clamp(0.0, 2.0);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}

/// What the engine is asked to speak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Start,
    Pause,
    Resume,
    End,
    Error(String),
}

impl SpeechEvent {
    fn name(&self) -> &'static str {
        match self {
            SpeechEvent::Start => "start",
            SpeechEvent::Pause => "pause",
            SpeechEvent::Resume => "resume",
            SpeechEvent::End => "end",
            SpeechEvent::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeechState {
    pub is_playing: bool,
    pub is_paused: bool,
    pub current_text: String,
    /// Percent, 0–100.
    pub progress: f64,
    pub duration: Duration,
}

#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Queue an utterance. Lifecycle events are delivered to
    /// [`SpeechController::handle_event`] by the host.
    async fn speak(&self, utterance: Utterance) -> Result<(), CapabilityError>;

    async fn pause(&self);

    async fn resume(&self);

    async fn cancel(&self);

    async fn is_paused(&self) -> bool;

    async fn voices(&self) -> Vec<Voice>;
}

/// Estimated speaking time at ten characters per second.
pub fn estimate_duration(text: &str) -> Duration {
    Duration::from_millis(text.chars().count() as u64 * 1000 / CHARACTERS_PER_SECOND)
}

/// English default voice, then any English voice, then the first voice.
pub fn pick_default_voice(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|v| v.is_english() && v.default)
        .or_else(|| voices.iter().find(|v| v.is_english()))
        .or_else(|| voices.first())
}

pub struct SpeechController<E: SpeechEngine> {
    engine: E,
    settings: VoiceSettings,
    muted: bool,
    voices: Vec<Voice>,
    state: SpeechState,
    history: BoundedList<String>,
}

impl<E: SpeechEngine> SpeechController<E> {
    pub fn new(engine: E) -> Self {
        Self::with_settings(engine, VoiceSettings::default())
    }

    pub fn with_settings(engine: E, settings: VoiceSettings) -> Self {
        Self {
            engine,
            settings: settings.clamped(),
            muted: false,
            voices: Vec::new(),
            state: SpeechState::default(),
            history: BoundedList::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: VoiceSettings) {
        self.settings = settings.clamped();
    }

    pub fn state(&self) -> &SpeechState {
        &self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Fetch the engine's voices and pick a default when none is selected.
    pub async fn load_voices(&mut self) -> &[Voice] {
        self.voices = self.engine.voices().await;
        if self.settings.voice.is_none() {
            self.settings.voice = pick_default_voice(&self.voices).map(|v| v.name.clone());
        }
        &self.voices
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Distinct primary language subtags of the loaded voices, sorted.
    pub fn language_options(&self) -> Vec<String> {
        self.voices
            .iter()
            .filter_map(|v| v.lang.split('-').next())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `None` for blank text.
    pub fn utterance(&self, text: &str) -> Option<Utterance> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Utterance {
            text: text.to_string(),
            voice: self.settings.voice.clone(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            volume: if self.muted { 0.0 } else { self.settings.volume },
            language: self.settings.language.clone(),
        })
    }

    /// Cancel whatever is playing and speak `text`. Returns the estimated
    /// duration.
    pub async fn play(&mut self, text: &str) -> Result<Duration, CapabilityError> {
        let utterance = self.utterance(text).ok_or(ToolError::EmptyInput {
            action: "convert to speech",
        })?;

        self.engine.cancel().await;

        let duration = estimate_duration(text);
        self.state.duration = duration;
        self.state.current_text = text.to_string();
        self.remember(text.trim());

        if let Err(e) = self.engine.speak(utterance).await {
            self.handle_event(SpeechEvent::Error(e.to_string()));
            return Err(e);
        }
        Ok(duration)
    }

    pub async fn pause(&mut self) {
        if self.state.is_playing && !self.state.is_paused {
            self.engine.pause().await;
        }
    }

    pub async fn resume(&mut self) {
        if self.engine.is_paused().await {
            self.engine.resume().await;
        }
    }

    pub async fn stop(&mut self) {
        self.engine.cancel().await;
        self.state.is_playing = false;
        self.state.is_paused = false;
        self.state.progress = 0.0;
    }

    pub fn handle_event(&mut self, event: SpeechEvent) {
        let detail = match &event {
            SpeechEvent::Error(reason) => Some(reason.as_str()),
            _ => None,
        };
        SpeechEventReceived {
            event: event.name(),
            detail,
        }
        .log();

        match event {
            SpeechEvent::Start => {
                self.state.is_playing = true;
                self.state.is_paused = false;
                self.state.progress = 0.0;
            }
            SpeechEvent::Pause => self.state.is_paused = true,
            SpeechEvent::Resume => self.state.is_paused = false,
            SpeechEvent::End => {
                self.state.is_playing = false;
                self.state.is_paused = false;
                self.state.progress = 100.0;
            }
            SpeechEvent::Error(_) => {
                self.state.is_playing = false;
                self.state.is_paused = false;
            }
        }
    }

    /// Advance progress from elapsed playback time. Only moves while playing
    /// and not paused.
    pub fn update_progress(&mut self, elapsed: Duration) -> f64 {
        if self.state.is_playing && !self.state.is_paused && !self.state.duration.is_zero() {
            let ratio = elapsed.as_secs_f64() / self.state.duration.as_secs_f64();
            self.state.progress = (ratio * 100.0).min(100.0);
        }
        self.state.progress
    }

    fn remember(&mut self, text: &str) {
        remember_spoken(&mut self.history, text);
    }

    pub fn history(&self) -> &[String] {
        self.history.items()
    }

    /// Replace the history, e.g. with the list read back from storage.
    pub fn restore_history(&mut self, history: BoundedList<String>) {
        self.history = history;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Pretty JSON with the text, current settings and instructions for
    /// recording the audio.
    pub fn export_settings(&self, text: &str, now: &DateTime<Utc>) -> Result<String, CapabilityError> {
        if text.trim().is_empty() {
            return Err(ToolError::EmptyInput {
                action: "convert to speech",
            }
            .into());
        }
        let export = SpeechExport {
            text,
            voice: self.settings.voice.as_deref().unwrap_or("Default"),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            volume: self.settings.volume,
            language: &self.settings.language,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            instructions: ExportInstructions::default(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

/// Add `text` to the front of a speech history unless it is already the
/// newest entry.
pub fn remember_spoken(history: &mut BoundedList<String>, text: &str) {
    if history.first().map(String::as_str) != Some(text) {
        history.push(text.to_string());
    }
}

pub fn export_filename(now: &DateTime<Utc>) -> String {
    format!("speech-{}.json", now.timestamp_millis())
}

#[derive(Serialize)]
struct SpeechExport<'a> {
    text: &'a str,
    voice: &'a str,
    rate: f32,
    pitch: f32,
    volume: f32,
    language: &'a str,
    timestamp: String,
    instructions: ExportInstructions,
}

#[derive(Serialize)]
struct ExportInstructions {
    note: &'static str,
    steps: [&'static str; 4],
    recommended_tools: [&'static str; 3],
}

impl Default for ExportInstructions {
    fn default() -> Self {
        Self {
            note: "This file contains speech synthesis settings. To convert to MP3:",
            steps: [
                "1. Use the 'Play' button to start speech synthesis",
                "2. Use screen recording software to record the audio output",
                "3. Convert the recording to MP3 format",
                "4. Alternative: Use online TTS services that support MP3 export",
            ],
            recommended_tools: [
                "OBS Studio (free screen recording)",
                "Audacity (free audio editing)",
                "Online TTS services with MP3 export",
            ],
        }
    }
}

/// Engine that records utterances instead of producing audio. Backs the
/// `speech` processor and tests.
#[derive(Debug, Default)]
pub struct TranscriptSpeechEngine {
    voices: Vec<Voice>,
    spoken: Mutex<Vec<Utterance>>,
    paused: AtomicBool,
    cancellations: AtomicUsize,
    failure: Option<String>,
}

impl TranscriptSpeechEngine {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    /// An engine whose every `speak` fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub async fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().await.clone()
    }

    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechEngine for TranscriptSpeechEngine {
    async fn speak(&self, utterance: Utterance) -> Result<(), CapabilityError> {
        if let Some(reason) = &self.failure {
            return Err(CapabilityError::Speech(reason.clone()));
        }
        self.spoken.lock().await.push(utterance);
        Ok(())
    }

    async fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    async fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    async fn cancel(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }

    async fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    async fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("Amelie", "fr-FR", true),
            Voice::new("Daniel", "en-GB", false),
            Voice::new("Samantha", "en-US", true),
        ]
    }

    #[test]
    fn test_pick_default_voice_table_driven() {
        let cases = vec![
            (voices(), Some("Samantha")),
            (vec![Voice::new("Amelie", "fr-FR", true), Voice::new("Daniel", "en-GB", false)], Some("Daniel")),
            (vec![Voice::new("Amelie", "fr-FR", false), Voice::new("Anna", "de-DE", true)], Some("Amelie")),
            (vec![], None),
        ];
        for (available, expected) in cases {
            assert_eq!(pick_default_voice(&available).map(|v| v.name.as_str()), expected);
        }
    }

    #[test]
    fn test_settings_are_clamped() {
        let settings = VoiceSettings {
            rate: 5.0,
            pitch: -1.0,
            volume: 1.5,
            ..VoiceSettings::default()
        }
        .clamped();
        assert_eq!((settings.rate, settings.pitch, settings.volume), (2.0, 0.0, 1.0));
    }

    #[test]
    fn test_estimate_duration() {
        assert_eq!(estimate_duration(""), Duration::ZERO);
        assert_eq!(estimate_duration("0123456789"), Duration::from_secs(1));
        assert_eq!(estimate_duration("abcde"), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_play_speaks_and_records_history() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::new(voices()));
        controller.load_voices().await;
        assert_eq!(controller.settings().voice.as_deref(), Some("Samantha"));

        let duration = controller.play("  Hello there  ").await.unwrap();
        assert_eq!(duration, estimate_duration("  Hello there  "));
        assert_eq!(controller.engine().cancellations(), 1);

        let spoken = controller.engine().spoken().await;
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].voice.as_deref(), Some("Samantha"));
        assert_eq!(spoken[0].language, "en-US");
        assert_eq!(controller.history(), &["Hello there".to_string()]);
    }

    #[tokio::test]
    async fn test_play_refuses_blank_text() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::default());
        let err = controller.play("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter some text to convert to speech");
        assert!(controller.engine().spoken().await.is_empty());
        assert!(controller.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_skips_repeated_head_and_is_bounded() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::default());
        controller.play("same").await.unwrap();
        controller.play("same ").await.unwrap();
        assert_eq!(controller.history().len(), 1);

        for i in 0..12 {
            controller.play(&format!("line {}", i)).await.unwrap();
        }
        assert_eq!(controller.history().len(), 10);
        assert_eq!(controller.history()[0], "line 11");

        controller.clear_history();
        assert!(controller.history().is_empty());
    }

    #[tokio::test]
    async fn test_muted_utterance_has_zero_volume() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::default());
        controller.set_muted(true);
        controller.play("quiet please").await.unwrap();
        assert_eq!(controller.engine().spoken().await[0].volume, 0.0);
        assert_eq!(controller.settings().volume, 1.0);
    }

    #[tokio::test]
    async fn test_engine_failure_resets_state() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::failing("synthesis-failed"));
        controller.handle_event(SpeechEvent::Start);
        let err = controller.play("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Speech error: synthesis-failed");
        assert!(!controller.state().is_playing);
    }

    #[tokio::test]
    async fn test_event_lifecycle_and_progress() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::default());
        controller.play("0123456789").await.unwrap();

        controller.handle_event(SpeechEvent::Start);
        assert!(controller.state().is_playing);
        assert_eq!(controller.update_progress(Duration::from_millis(500)), 50.0);

        controller.pause().await;
        assert!(controller.engine().is_paused().await);
        controller.handle_event(SpeechEvent::Pause);
        assert_eq!(controller.update_progress(Duration::from_millis(900)), 50.0);

        controller.resume().await;
        assert!(!controller.engine().is_paused().await);
        controller.handle_event(SpeechEvent::Resume);
        assert_eq!(controller.update_progress(Duration::from_secs(3)), 100.0);

        controller.handle_event(SpeechEvent::End);
        assert!(!controller.state().is_playing);
        assert_eq!(controller.state().progress, 100.0);

        controller.stop().await;
        assert_eq!(controller.state().progress, 0.0);
    }

    #[tokio::test]
    async fn test_language_options() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::new(voices()));
        controller.load_voices().await;
        assert_eq!(controller.language_options(), vec!["en".to_string(), "fr".to_string()]);
    }

    #[test]
    fn test_export_settings() {
        let controller = SpeechController::new(TranscriptSpeechEngine::default());
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let json = controller.export_settings("Read me", &now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["text"], "Read me");
        assert_eq!(value["voice"], "Default");
        assert_eq!(value["timestamp"], "2024-05-06T07:08:09.000Z");
        assert_eq!(value["instructions"]["steps"].as_array().unwrap().len(), 4);
        assert_eq!(export_filename(&now), format!("speech-{}.json", now.timestamp_millis()));
        assert!(controller.export_settings(" ", &now).is_err());
    }

    #[tokio::test]
    async fn test_restore_history_then_play() {
        let mut controller = SpeechController::new(TranscriptSpeechEngine::default());
        controller.restore_history(BoundedList::from_items(
            (0..15).map(|i| i.to_string()).collect(),
            3,
        ));
        assert_eq!(controller.history(), &["0", "1", "2"]);

        controller.play("0").await.unwrap();
        controller.play("new").await.unwrap();
        assert_eq!(controller.history(), &["new", "0", "1"]);
    }
}
