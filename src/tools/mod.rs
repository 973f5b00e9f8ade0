// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The text tools.
//!
//! Every tool is a synchronous function over a string and a small option struct.
//! Tools never panic on user input and never touch shared state; the processor
//! layer in `backends::local` wraps each of them for pipeline use.

pub mod case_converter;
pub mod codec;
pub mod email_extractor;
pub mod json_formatter;
pub mod keyword_density;
pub mod lorem;
pub mod numeric;
pub mod password;
pub mod permalink;
pub mod slug;
pub mod speech;
pub mod text_cleaner;
pub mod text_diff;
pub mod text_stats;

use serde::Serialize;

/// Static description of a tool, as shown by `textkit list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    /// Name of the processor implementation that runs this tool.
    pub impl_name: &'static str,
}

const CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: "word-counter",
        name: "Word Counter",
        description: "Count words, characters, and sentences in your text",
        path: "/word-counter",
        icon: "Calculator",
        impl_name: "text_stats",
    },
    ToolDescriptor {
        id: "case-converter",
        name: "Case Converter",
        description: "Convert text between different cases",
        path: "/case-converter",
        icon: "Type",
        impl_name: "case_converter",
    },
    ToolDescriptor {
        id: "text-difference",
        name: "Text Difference",
        description: "Compare two texts and find the differences",
        path: "/text-difference",
        icon: "GitCompare",
        impl_name: "text_diff",
    },
    ToolDescriptor {
        id: "json-formatter",
        name: "JSON Formatter",
        description: "Format and validate JSON data",
        path: "/json-formatter",
        icon: "Braces",
        impl_name: "json_formatter",
    },
    ToolDescriptor {
        id: "text-cleaner",
        name: "Text Cleaner",
        description: "Remove extra spaces, lines, and formatting",
        path: "/text-cleaner",
        icon: "Sparkles",
        impl_name: "text_cleaner",
    },
    ToolDescriptor {
        id: "lorem-generator",
        name: "Lorem Ipsum Generator",
        description: "Generate placeholder text for designs",
        path: "/lorem-generator",
        icon: "Type",
        impl_name: "lorem",
    },
    ToolDescriptor {
        id: "slug-generator",
        name: "URL Slug Generator",
        description: "Convert text to URL-friendly slugs",
        path: "/slug-generator",
        icon: "Link",
        impl_name: "slug",
    },
    ToolDescriptor {
        id: "keyword-analyzer",
        name: "Keyword Analyzer",
        description: "Analyze keyword density and frequency in your text",
        path: "/keyword-analyzer",
        icon: "BarChart2",
        impl_name: "keyword_density",
    },
    ToolDescriptor {
        id: "character-counter",
        name: "Character Counter Pro",
        description: "Advanced text analysis with social media limits",
        path: "/character-counter",
        icon: "BarChart",
        impl_name: "text_stats",
    },
    ToolDescriptor {
        id: "email-extractor",
        name: "Email Extractor",
        description: "Extract and validate email addresses from text",
        path: "/email-extractor",
        icon: "AtSign",
        impl_name: "email_extractor",
    },
    ToolDescriptor {
        id: "permalink-generator",
        name: "Permalink Generator",
        description: "Create SEO-friendly permalinks with multiple strategies and validation",
        path: "/permalink-generator",
        icon: "Link2",
        impl_name: "permalink",
    },
    ToolDescriptor {
        id: "password-generator",
        name: "Password Generator",
        description: "Generate secure, customizable passwords with security analysis",
        path: "/password-generator",
        icon: "KeyRound",
        impl_name: "password",
    },
    ToolDescriptor {
        id: "text-encoder",
        name: "Text Encoder/Decoder",
        description: "Convert text using Base64, URL encoding, and HTML entities",
        path: "/text-encoder",
        icon: "Code",
        impl_name: "codec",
    },
    ToolDescriptor {
        id: "text-to-binary-hex",
        name: "Text to Binary/Hex Converter",
        description: "Convert text to binary, hexadecimal, octal, and decimal",
        path: "/text-to-binary-hex",
        icon: "Binary",
        impl_name: "numeric",
    },
    ToolDescriptor {
        id: "text-to-speech",
        name: "Text to Speech",
        description: "Convert text to speech with multiple voices and settings",
        path: "/text-to-speech",
        icon: "Volume2",
        impl_name: "speech",
    },
];

/// All tools, in display order.
pub fn catalog() -> &'static [ToolDescriptor] {
    CATALOG
}

pub fn find_tool(id: &str) -> Option<&'static ToolDescriptor> {
    CATALOG.iter().find(|tool| tool.id == id)
}

/// Uppercase the first character of `word`, leaving the rest untouched.
pub(crate) fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
