// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Base64, URL-component and HTML-entity encoding.
//!
//! Failures are explicit [`CodecError`]s; [`soft_fail_output`] maps them to the
//! placeholder strings shown in place of output.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::errors::CodecError;
use crate::observability::messages::tools::CodecFailed;
use crate::observability::messages::StructuredLog;

pub const ENCODE_FAILED: &str = "Error encoding text";
pub const DECODE_FAILED: &str = "Error decoding text";

/// Padding is written on encode and optional on decode.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#39);").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Base64,
    Url,
    Html,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Base64 => "base64",
            Scheme::Url => "url",
            Scheme::Html => "html",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Encode,
    Decode,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Encode => Direction::Decode,
            Direction::Decode => Direction::Encode,
        }
    }
}

pub fn encode(text: &str, scheme: Scheme) -> String {
    match scheme {
        Scheme::Base64 => BASE64.encode(text.as_bytes()),
        Scheme::Url => utf8_percent_encode(text, URI_COMPONENT).to_string(),
        Scheme::Html => text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;"),
    }
}

pub fn decode(text: &str, scheme: Scheme) -> Result<String, CodecError> {
    match scheme {
        Scheme::Base64 => {
            let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            let bytes = BASE64
                .decode(compact)
                .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8(e.to_string()))
        }
        Scheme::Url => {
            check_percent_escapes(text)?;
            percent_decode_str(text)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|e| CodecError::InvalidUtf8(e.to_string()))
        }
        // One pass: "&amp;lt;" decodes to "&lt;", not "<".
        Scheme::Html => Ok(HTML_ENTITY
            .replace_all(text, |caps: &regex::Captures| match &caps[0] {
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                _ => "'",
            })
            .into_owned()),
    }
}

fn check_percent_escapes(text: &str) -> Result<(), CodecError> {
    let bytes = text.as_bytes();
    for (position, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let well_formed = bytes
            .get(position + 1..position + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(CodecError::MalformedPercentEscape { position });
        }
    }
    Ok(())
}

/// Encode or decode. Blank input produces empty output in both directions.
pub fn transcode(text: &str, scheme: Scheme, direction: Direction) -> Result<String, CodecError> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    let result = match direction {
        Direction::Encode => Ok(encode(text, scheme)),
        Direction::Decode => decode(text, scheme),
    };
    if let Err(e) = &result {
        CodecFailed {
            scheme: scheme.as_str(),
            direction: direction.as_str(),
            error: e,
        }
        .log();
    }
    result
}

/// The display form of a codec result: the output, or a fixed placeholder.
pub fn soft_fail_output(result: Result<String, CodecError>, direction: Direction) -> String {
    result.unwrap_or_else(|_| match direction {
        Direction::Encode => ENCODE_FAILED.to_string(),
        Direction::Decode => DECODE_FAILED.to_string(),
    })
}
