// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::{CapabilityError, ProcessorError};
use crate::observability::messages::storage::DownloadWritten;
use crate::observability::messages::StructuredLog;
use crate::traits::Processor;

/// A file offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub content: String,
    pub mime_type: &'static str,
    pub filename: String,
}

impl Download {
    pub fn text(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, content, "text/plain")
    }

    pub fn json(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, content, "application/json")
    }

    pub fn csv(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, content, "text/csv")
    }

    fn new(filename: impl Into<String>, content: impl Into<String>, mime_type: &'static str) -> Self {
        Self {
            content: content.into(),
            mime_type,
            filename: filename.into(),
        }
    }
}

/// The download for one processor run over `input`: the processor's own export
/// when it has one, otherwise `output` as `<name>-output.txt`. A non-empty
/// `filename` replaces the default name.
pub async fn processor_download(
    processor: &dyn Processor,
    input: &str,
    output: &str,
    filename: Option<&str>,
) -> Result<Download, ProcessorError> {
    let mut download = match processor.export(input).await? {
        Some(download) => download,
        None => Download::text(format!("{}-output.txt", processor.name()), output),
    };
    if let Some(filename) = filename.filter(|name| !name.trim().is_empty()) {
        download.filename = filename.to_string();
    }
    Ok(download)
}

#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver the download, returning where it ended up.
    async fn save(&self, download: &Download) -> Result<PathBuf, CapabilityError>;
}

/// Writes downloads as files into one directory, created on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    directory: PathBuf,
}

impl DirectoryDownloadSink {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl DownloadSink for DirectoryDownloadSink {
    async fn save(&self, download: &Download) -> Result<PathBuf, CapabilityError> {
        // Only the final path component is honored.
        let filename = Path::new(&download.filename)
            .file_name()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid download filename '{}'", download.filename),
                )
            })?;

        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(filename);
        tokio::fs::write(&path, download.content.as_bytes()).await?;

        DownloadWritten {
            filename: &download.filename,
            mime_type: download.mime_type,
            size: download.content.len(),
        }
        .log();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let temp = TempDir::new().unwrap();
        let sink = DirectoryDownloadSink::new(temp.path().join("downloads"));
        let download = Download::csv("keywords.csv", "Keyword,Count\nrust,3");

        let path = sink.save(&download).await.unwrap();
        assert_eq!(path, temp.path().join("downloads").join("keywords.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Keyword,Count\nrust,3");
    }

    #[tokio::test]
    async fn test_directory_sink_strips_directories() {
        let temp = TempDir::new().unwrap();
        let sink = DirectoryDownloadSink::new(temp.path());
        let path = sink.save(&Download::text("../escape.txt", "x")).await.unwrap();
        assert_eq!(path, temp.path().join("escape.txt"));
    }

    #[tokio::test]
    async fn test_directory_sink_rejects_empty_name() {
        let temp = TempDir::new().unwrap();
        let sink = DirectoryDownloadSink::new(temp.path());
        let result = sink.save(&Download::text("..", "x")).await;
        assert!(matches!(result, Err(CapabilityError::Download(_))));
    }

    #[tokio::test]
    async fn test_analysis_download_is_the_report() {
        use crate::backends::local::TextStatsProcessor;

        let temp = TempDir::new().unwrap();
        let input = "The quick brown fox. It jumps!";
        let download = processor_download(&TextStatsProcessor::new(), input, input, None)
            .await
            .unwrap();
        let path = DirectoryDownloadSink::new(temp.path()).save(&download).await.unwrap();

        assert_eq!(path, temp.path().join("text-analysis.txt"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("TEXT ANALYSIS REPORT"), "{}", written);
        assert_ne!(written, input);
    }

    #[tokio::test]
    async fn test_transform_download_falls_back_to_output() {
        use crate::backends::local::CaseConverterProcessor;

        let processor = CaseConverterProcessor::new(Default::default());
        let cases = vec![
            (None, "case_converter-output.txt"),
            (Some(""), "case_converter-output.txt"),
            (Some("shout.txt"), "shout.txt"),
        ];
        for (filename, expected) in cases {
            let download = processor_download(&processor, "hi", "HI", filename).await.unwrap();
            assert_eq!(download.filename, expected, "{:?}", filename);
            assert_eq!(download.content, "HI");
            assert_eq!(download.mime_type, "text/plain");
        }
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(Download::text("a.txt", "").mime_type, "text/plain");
        assert_eq!(Download::json("a.json", "{}").mime_type, "application/json");
        assert_eq!(Download::csv("a.csv", "").mime_type, "text/csv");
    }
}
