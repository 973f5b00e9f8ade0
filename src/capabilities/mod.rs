// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host capabilities the tools hand their results to: the clipboard and file
//! downloads. Both are async seams with in-process implementations; the
//! clipboard also has a system-command one for the CLI.

pub mod clipboard;
pub mod download;

pub use clipboard::{
    copy_to_clipboard, Clipboard, CommandClipboard, MemoryClipboard, Notification, NotificationLevel,
};
pub use download::{processor_download, DirectoryDownloadSink, Download, DownloadSink};
