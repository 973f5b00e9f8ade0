// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{run_tool, ToolRun};
use crate::envelope::{ProcessorRequest, ProcessorResponse};
use crate::errors::ToolError;
use crate::storage::{HistoryStore, PASSWORD_HISTORY_KEY};
use crate::tools::password::{
    analyze_password, generate_passwords, PasswordHistory, PasswordHistoryItem, PasswordOptions,
};
use crate::traits::{processor::ProcessorIntent, Processor};
use crate::utils::secure_rng;

pub const MAX_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordMode {
    /// Replace the payload with freshly generated passwords.
    #[default]
    Generate,
    /// Score the payload as a password and report the analysis.
    Analyze,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordProcessorOptions {
    pub mode: PasswordMode,
    #[serde(flatten)]
    pub password: PasswordOptions,
    pub count: usize,
}

impl Default for PasswordProcessorOptions {
    fn default() -> Self {
        Self {
            mode: PasswordMode::Generate,
            password: PasswordOptions::default(),
            count: 1,
        }
    }
}

impl PasswordProcessorOptions {
    pub fn validate(&self) -> Result<(), ToolError> {
        if !(1..=MAX_COUNT).contains(&self.count) {
            return Err(ToolError::OutOfRange {
                name: "count",
                min: 1,
                max: MAX_COUNT,
                actual: self.count,
            });
        }
        self.password.validate()?;
        if self.mode == PasswordMode::Generate && self.password.charset().is_empty() {
            return Err(ToolError::EmptyCharset);
        }
        Ok(())
    }
}

/// Password processor - generates passwords from the OS-seeded CSPRNG, or
/// analyzes the payload as one.
///
/// Generated passwords never reach the log; only their count does.
pub struct PasswordProcessor {
    options: PasswordProcessorOptions,
    history: Mutex<PasswordHistory>,
    store: Option<HistoryStore>,
}

impl PasswordProcessor {
    pub fn new(options: PasswordProcessorOptions) -> Self {
        Self {
            options,
            history: Mutex::new(PasswordHistory::default()),
            store: None,
        }
    }

    /// Persist the history in `store` under the password history key.
    pub fn with_history_store(mut self, store: HistoryStore) -> Self {
        self.store = Some(store);
        self
    }

    /// The most recent generations, newest first.
    pub async fn history(&self) -> Vec<PasswordHistoryItem> {
        self.history.lock().await.entries().to_vec()
    }

    async fn remember(&self, passwords: &[String]) {
        if passwords.is_empty() {
            return;
        }
        let now = Utc::now().timestamp_millis();
        let mut history = self.history.lock().await;
        match &self.store {
            Some(store) => {
                let entries = store
                    .update(PASSWORD_HISTORY_KEY, |entries| {
                        for password in passwords {
                            entries.push(PasswordHistoryItem::new(password, now));
                        }
                    })
                    .await;
                history.restore(entries);
            }
            None => {
                for password in passwords {
                    history.record(password, now);
                }
            }
        }
    }

    fn analyze(input: &str) -> ToolRun {
        let analysis = analyze_password(input);
        ToolRun::analyzed()
            .with("strength", analysis.strength)
            .with("score", analysis.score)
            .with("entropy", format!("{:.1}", analysis.entropy))
            .with("time_to_crack", analysis.time_to_crack)
            .with("issues", analysis.issues.join("; "))
    }
}

#[async_trait]
impl Processor for PasswordProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        if self.options.mode == PasswordMode::Analyze {
            return run_tool(self.name(), req, |input| Ok(Self::analyze(input)));
        }

        let mut generated = Vec::new();
        let response = run_tool(self.name(), req, |_| {
            let passwords =
                generate_passwords(self.options.count, &self.options.password, &mut secure_rng())?;

            let mut run = ToolRun::transformed(passwords.join("\n")).with("count", passwords.len());
            if let [password] = passwords.as_slice() {
                let analysis = analyze_password(password);
                run = run
                    .with("strength", analysis.strength)
                    .with("entropy", format!("{:.1}", analysis.entropy));
            }
            generated = passwords;
            Ok(run)
        });
        self.remember(&generated).await;
        response
    }

    fn name(&self) -> &'static str {
        "password"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        match self.options.mode {
            PasswordMode::Generate => ProcessorIntent::Transform,
            PasswordMode::Analyze => ProcessorIntent::Analyze,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::password::{NUMBERS, UPPERCASE};

    #[tokio::test]
    async fn test_generates_requested_count_and_length() {
        let processor = PasswordProcessor::new(PasswordProcessorOptions {
            count: 3,
            password: PasswordOptions {
                length: 20,
                ..PasswordOptions::default()
            },
            ..PasswordProcessorOptions::default()
        });
        let response = processor.process(ProcessorRequest::default()).await;

        let passwords: Vec<&str> = response.payload_text().unwrap().lines().collect();
        assert_eq!(passwords.len(), 3);
        for password in &passwords {
            assert_eq!(password.chars().count(), 20);
            assert!(password.chars().any(|c| UPPERCASE.contains(c)));
            assert!(password.chars().any(|c| NUMBERS.contains(c)));
        }

        let history = processor.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].password, passwords[2]);
    }

    #[tokio::test]
    async fn test_analyze_mode_keeps_payload() {
        let processor = PasswordProcessor::new(PasswordProcessorOptions {
            mode: PasswordMode::Analyze,
            ..PasswordProcessorOptions::default()
        });
        assert_eq!(processor.declared_intent(), ProcessorIntent::Analyze);

        let response = processor.process(ProcessorRequest::from_text("password")).await;
        assert_eq!(response.payload_text(), Some("password"));
        let metadata = response.metadata.expect("metadata");
        assert_eq!(
            metadata.get_metadata_value("password", "strength"),
            Some("Very Weak")
        );
    }

    #[test]
    fn test_validate() {
        let cases = vec![
            (PasswordProcessorOptions::default(), true),
            (
                PasswordProcessorOptions {
                    count: 0,
                    ..PasswordProcessorOptions::default()
                },
                false,
            ),
            (
                PasswordProcessorOptions {
                    password: PasswordOptions {
                        include_uppercase: false,
                        include_lowercase: false,
                        include_numbers: false,
                        include_symbols: false,
                        ..PasswordOptions::default()
                    },
                    ..PasswordProcessorOptions::default()
                },
                false,
            ),
        ];
        for (options, ok) in cases {
            assert_eq!(options.validate().is_ok(), ok, "{:?}", options);
        }
    }

    #[tokio::test]
    async fn test_history_keeps_passwords_whole() {
        let processor = PasswordProcessor::new(PasswordProcessorOptions {
            count: 4,
            password: PasswordOptions {
                length: 12,
                use_custom_chars: true,
                custom_chars: "ab\n".to_string(),
                require_all_types: false,
                ..PasswordOptions::default()
            },
            ..PasswordProcessorOptions::default()
        });
        processor.process(ProcessorRequest::default()).await;

        let history = processor.history().await;
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|item| item.password.chars().count() == 12));
    }

    #[tokio::test]
    async fn test_history_survives_reopened_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = PasswordProcessorOptions {
            count: 2,
            ..PasswordProcessorOptions::default()
        };

        let first = PasswordProcessor::new(options.clone())
            .with_history_store(HistoryStore::open(temp.path(), 10).unwrap());
        let response = first.process(ProcessorRequest::default()).await;
        let generated: Vec<String> =
            response.payload_text().unwrap().lines().map(str::to_string).collect();

        let reopened = HistoryStore::open(temp.path(), 10).unwrap();
        let second = PasswordProcessor::new(options).with_history_store(reopened.clone());
        second.process(ProcessorRequest::default()).await;

        let stored: crate::storage::BoundedList<PasswordHistoryItem> =
            reopened.load(PASSWORD_HISTORY_KEY).await;
        assert_eq!(stored.len(), 4);
        assert_eq!(stored.items()[3].password, generated[0]);
        assert_eq!(stored.items()[2].password, generated[1]);
        assert_eq!(second.history().await, stored.items().to_vec());
    }
}
