// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::envelope::PipelineMetadata;

/// Flatten pipeline metadata into `processor.key` / value pairs.
///
/// Processors are listed in key order and, within a processor, keys in key order,
/// so the output is stable across runs.
///
/// # Example
///
/// ```rust
/// use the_textkit::envelope::PipelineMetadata;
/// use the_textkit::utils::flatten_metadata;
///
/// let mut metadata = PipelineMetadata::new();
/// metadata.add_metadata("stats", "words", "4");
/// metadata.add_metadata("case", "mode", "kebab");
///
/// let flat = flatten_metadata(&metadata);
///
/// assert_eq!(
///     flat,
///     vec![
///         ("case.mode".to_string(), "kebab".to_string()),
///         ("stats.words".to_string(), "4".to_string()),
///     ]
/// );
/// ```
pub fn flatten_metadata(metadata: &PipelineMetadata) -> Vec<(String, String)> {
    metadata
        .metadata
        .iter()
        .flat_map(|(processor, entries)| {
            entries
                .metadata
                .iter()
                .map(move |(key, value)| (format!("{}.{}", processor, key), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_empty_metadata() {
        assert!(flatten_metadata(&PipelineMetadata::new()).is_empty());
    }

    #[test]
    fn test_flatten_orders_by_processor_then_key() {
        let mut metadata = PipelineMetadata::new();
        metadata.add_metadata("b", "z", "1");
        metadata.add_metadata("b", "a", "2");
        metadata.add_metadata("a", "k", "3");

        let keys: Vec<String> = flatten_metadata(&metadata)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a.k", "b.a", "b.z"]);
    }
}
