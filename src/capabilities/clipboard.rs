// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::errors::CapabilityError;
use crate::observability::messages::storage::ClipboardWriteFailed;
use crate::observability::messages::StructuredLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user, such as "Copied to clipboard!".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Copy `text` and report the outcome as a notification. Failures never
/// propagate.
pub async fn copy_to_clipboard<C: Clipboard + ?Sized>(clipboard: &C, text: &str) -> Notification {
    match clipboard.write_text(text).await {
        Ok(()) => Notification::success("Copied to clipboard!"),
        Err(e) => {
            ClipboardWriteFailed {
                reason: &e.to_string(),
            }
            .log();
            Notification::error("Failed to copy text")
        }
    }
}

/// Process-local clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write.
    pub fn unavailable() -> Self {
        Self {
            contents: Mutex::new(None),
            unavailable: true,
        }
    }

    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        if self.unavailable {
            return Err(CapabilityError::Clipboard("write access denied".to_string()));
        }
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard backed by a system command that reads the text on stdin, such as
/// `pbcopy` or `wl-copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Parse a whitespace-separated command line, e.g. `xclip -selection clipboard`.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }

    /// The usual clipboard command of the platform.
    pub fn system() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", &[])
        } else if cfg!(windows) {
            Self::new("clip", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", &[])
        } else {
            Self::new("xclip", &["-selection", "clipboard"])
        }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let failed =
            |reason: String| CapabilityError::Clipboard(format!("{}: {}", self.program, reason));

        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| failed(e.to_string()))?;
        }

        let status = child.wait().await.map_err(|e| failed(e.to_string()))?;
        if !status.success() {
            return Err(failed(format!("exited with {}", status)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_success() {
        let clipboard = MemoryClipboard::new();
        let notification = copy_to_clipboard(&clipboard, "hello").await;
        assert_eq!(notification, Notification::success("Copied to clipboard!"));
        assert_eq!(clipboard.contents().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_copy_failure_becomes_notification() {
        let clipboard = MemoryClipboard::unavailable();
        let notification = copy_to_clipboard(&clipboard, "hello").await;
        assert!(notification.is_error());
        assert_eq!(notification.message, "Failed to copy text");
        assert_eq!(clipboard.contents().await, None);
    }

    #[tokio::test]
    async fn test_dyn_clipboard() {
        let clipboard: Box<dyn Clipboard> = Box::new(MemoryClipboard::new());
        assert!(!copy_to_clipboard(clipboard.as_ref(), "x").await.is_error());
    }

    #[test]
    fn test_command_line_parsing() {
        assert_eq!(
            CommandClipboard::from_command_line(" xclip -selection clipboard "),
            Some(CommandClipboard::new("xclip", &["-selection", "clipboard"]))
        );
        assert_eq!(CommandClipboard::from_command_line("   "), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_clipboard_pipes_text() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("clipboard.txt");
        let script = format!("cat > '{}'", target.display());
        let clipboard = CommandClipboard::new("sh", &["-c", &script]);

        let notification = copy_to_clipboard(&clipboard, "copied text").await;
        assert!(!notification.is_error(), "{:?}", notification);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "copied text");
    }

    #[tokio::test]
    async fn test_missing_command_becomes_notification() {
        let clipboard = CommandClipboard::new("textkit-no-such-clipboard-tool", &[]);
        let notification = copy_to_clipboard(&clipboard, "hello").await;
        assert!(notification.is_error());
    }
}
