// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use std::sync::Arc;

use crate::backends::local::LocalProcessorFactory;
use crate::errors::ProcessorMapError;
use crate::observability::messages::processor::ProcessorInstantiationFailed;
use crate::observability::messages::StructuredLog;
use crate::storage::HistoryStore;
use crate::traits::Processor;

/// Processors of a pipeline, keyed by ID, in execution order.
///
/// Insertion order is the order the chain executor runs them in.
///
/// # Examples
///
/// ```
/// use the_textkit::config::ProcessorMap;
/// use the_textkit::backends::local::TextStatsProcessor;
/// use std::sync::Arc;
///
/// let mut processor_map = ProcessorMap::new();
/// processor_map.insert("stats".to_string(), Arc::new(TextStatsProcessor::new()));
///
/// assert_eq!(processor_map.len(), 1);
/// assert!(processor_map.contains_key("stats"));
/// ```
#[derive(Clone, Default)]
pub struct ProcessorMap(pub IndexMap<String, Arc<dyn Processor>>);

impl ProcessorMap {
    /// Create a new empty processor map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Create a ProcessorMap from configuration, instantiating every processor
    ///
    /// With a `storage` block, the processors share one history store in that
    /// directory, capped at `max_items` entries per history.
    pub fn from_config(cfg: &crate::config::Config) -> Result<Self, ProcessorMapError> {
        let history = cfg
            .storage
            .as_ref()
            .map(|storage| {
                HistoryStore::open(&storage.directory, storage.max_items).map_err(|e| {
                    ProcessorMapError::StorageUnavailable {
                        directory: storage.directory.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .transpose()?;
        let mut registry = IndexMap::new();

        for p in &cfg.processors {
            let impl_name = p.impl_.as_deref().unwrap_or_default();
            if !LocalProcessorFactory::is_implementation_available(impl_name) {
                return Err(ProcessorMapError::UnknownImplementation {
                    processor_id: p.id.clone(),
                    impl_name: impl_name.to_string(),
                });
            }

            let processor = LocalProcessorFactory::create_processor_with_history(p, history.as_ref())
                .map_err(|reason| {
                    ProcessorInstantiationFailed {
                        processor_id: &p.id,
                        impl_name,
                        reason: &reason,
                    }
                    .log();
                    ProcessorMapError::ProcessorCreationFailed {
                        processor_id: p.id.clone(),
                        reason,
                    }
                })?;

            registry.insert(p.id.clone(), processor);
        }

        Ok(Self(registry))
    }

    /// Insert a processor at the end of the map
    pub fn insert(&mut self, id: String, processor: Arc<dyn Processor>) {
        self.0.insert(id, processor);
    }

    /// Get a processor by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Processor>> {
        self.0.get(id)
    }

    /// Check if a processor exists
    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Processor IDs in execution order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Processors in execution order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<dyn Processor>)> {
        self.0.iter()
    }

    /// Get the number of processors in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the processor map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ProcessorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorMap")
            .field("processor_count", &self.0.len())
            .field("processor_ids", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<IndexMap<String, Arc<dyn Processor>>> for ProcessorMap {
    fn from(map: IndexMap<String, Arc<dyn Processor>>) -> Self {
        Self(map)
    }
}

impl From<ProcessorMap> for IndexMap<String, Arc<dyn Processor>> {
    fn from(map: ProcessorMap) -> Self {
        map.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_from_config_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected_processor_ids: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "empty config",
                yaml: "processors: []",
                expected_processor_ids: vec![],
            },
            TestCase {
                name: "single processor",
                yaml: "processors:\n  - {id: upper, impl_: case_converter}",
                expected_processor_ids: vec!["upper"],
            },
            TestCase {
                name: "declaration order is kept",
                yaml: "processors:\n  - {id: z, impl_: slug}\n  - {id: a, impl_: text_stats}\n  - {id: m, impl_: lorem}",
                expected_processor_ids: vec!["z", "a", "m"],
            },
        ];

        for test_case in test_cases {
            let config = parse_config(test_case.yaml).unwrap();
            let processor_map = ProcessorMap::from_config(&config)
                .unwrap_or_else(|e| panic!("{}: {}", test_case.name, e));
            let ids: Vec<&str> = processor_map.keys().map(String::as_str).collect();
            assert_eq!(ids, test_case.expected_processor_ids, "{}", test_case.name);
        }
    }

    #[test]
    fn test_from_config_errors() {
        let unknown = parse_config("processors:\n  - {id: x, impl_: rot13}").unwrap();
        assert!(matches!(
            ProcessorMap::from_config(&unknown),
            Err(ProcessorMapError::UnknownImplementation { .. })
        ));

        let missing = parse_config("processors:\n  - {id: x}").unwrap();
        assert!(matches!(
            ProcessorMap::from_config(&missing),
            Err(ProcessorMapError::UnknownImplementation { .. })
        ));

        let invalid =
            parse_config("processors:\n  - {id: x, impl_: slug, options: {max_length: 0}}").unwrap();
        match ProcessorMap::from_config(&invalid) {
            Err(ProcessorMapError::ProcessorCreationFailed { processor_id, .. }) => {
                assert_eq!(processor_id, "x")
            }
            other => panic!("Expected creation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_block_persists_histories() {
        let temp = tempfile::TempDir::new().unwrap();
        let directory = temp.path().join("state");
        let yaml = format!(
            "storage: {{directory: '{}', max_items: 2}}\nprocessors:\n  - {{id: pw, impl_: password}}",
            directory.display()
        );
        let config = parse_config(&yaml).unwrap();
        let processor_map = ProcessorMap::from_config(&config).unwrap();
        assert!(directory.is_dir());

        let processor = processor_map.get("pw").unwrap();
        for _ in 0..3 {
            processor
                .process(crate::envelope::ProcessorRequest::default())
                .await;
        }

        let reopened = HistoryStore::open(&directory, 10).unwrap();
        let entries: crate::storage::BoundedList<crate::tools::password::PasswordHistoryItem> =
            reopened.load(crate::storage::PASSWORD_HISTORY_KEY).await;
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_unusable_storage_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("not-a-directory");
        std::fs::write(&file, "x").unwrap();
        let yaml = format!(
            "storage: {{directory: '{}'}}\nprocessors:\n  - {{id: pw, impl_: password}}",
            file.display()
        );
        let config = parse_config(&yaml).unwrap();
        assert!(matches!(
            ProcessorMap::from_config(&config),
            Err(ProcessorMapError::StorageUnavailable { .. })
        ));
    }
}
