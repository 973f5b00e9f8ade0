// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_MAX_ITEMS, DEFAULT_STORAGE_DIR};
use crate::errors::{ConfigError, FailureStrategy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for a text pipeline.
///
/// Processors run in the order they are declared. Transform processors replace
/// the payload handed to the next processor; Analyze processors only add
/// metadata.
///
/// # Fields
/// * `failure_strategy` - How to handle processor failures (optional, defaults to FailFast)
/// * `storage` - Where password and speech histories persist and how many
///   entries are kept (optional; histories stay in memory without it)
/// * `processors` - Processor configurations, in execution order
///
/// # Example
/// ```yaml
/// failure_strategy: fail_fast
/// storage:
///   directory: ./.textkit
///   max_items: 10
/// processors:
///   - id: tidy
///     impl_: text_cleaner
///     options: { remove_special_chars: true }
///   - id: case
///     impl_: case_converter
///     options: { mode: kebab }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    pub processors: Vec<ProcessorConfig>,
}

/// Local persistence settings for tool histories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub directory: PathBuf,
    pub max_items: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// One step of a pipeline.
///
/// `impl_` names the tool (see `textkit list`); `options` is handed to that
/// tool's option struct, so its keys depend on the tool.
///
/// # Example
/// ```yaml
/// id: short_slug
/// impl_: slug
/// options:
///   separator: _
///   max_length: 40
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessorConfig {
    pub id: String,
    pub impl_: Option<String>,
    #[serde(default)]
    pub options: serde_yaml::Mapping,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse a config from YAML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is reported at once in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
processors:
  - id: tidy
    impl_: text_cleaner
  - id: case
    impl_: case_converter
    options:
      mode: kebab
"#;

        let cfg = parse_config(yaml).unwrap();
        assert_eq!(cfg.failure_strategy, FailureStrategy::FailFast);
        assert_eq!(cfg.storage, None);
        assert_eq!(cfg.processors.len(), 2);
        assert_eq!(cfg.processors[1].impl_.as_deref(), Some("case_converter"));
        assert_eq!(
            cfg.processors[1].options.get("mode"),
            Some(&serde_yaml::Value::from("kebab"))
        );
        assert!(cfg.processors[0].options.is_empty());
    }

    #[test]
    fn parse_storage_and_strategy() {
        let yaml = r#"
failure_strategy: continue_on_error
storage:
  directory: /tmp/textkit
processors: []
"#;
        let cfg = parse_config(yaml).unwrap();
        assert_eq!(cfg.failure_strategy, FailureStrategy::ContinueOnError);
        let storage = cfg.storage.expect("storage block");
        assert_eq!(storage.directory, PathBuf::from("/tmp/textkit"));
        assert_eq!(storage.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config(
            r#"
processors:
  - id: stats
    impl_: text_stats
  - id: slug
    impl_: slug
    options: { max_length: 30 }
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.processors.len(), 2);
    }

    #[test]
    fn test_load_and_validate_collects_every_error() {
        let file = write_config(
            r#"
processors:
  - id: a
    impl_: no_such_tool
  - id: a
    impl_: password
    options: { length: 2 }
  - id: b
"#,
        );

        match load_and_validate_config(file.path()) {
            Err(ConfigError::Invalid(errors)) => {
                assert_eq!(errors.len(), 4, "{:?}", errors);
                assert!(errors.contains(&ValidationError::DuplicateProcessorId {
                    processor_id: "a".to_string()
                }));
                assert!(errors.contains(&ValidationError::MissingImplementation {
                    processor_id: "b".to_string()
                }));
            }
            other => panic!("Expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let file = write_config("processors: [ {id: x");
        let error = load_config(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Yaml(_)));
        assert!(error.to_string().starts_with("Failed to parse pipeline configuration"));
    }
}
