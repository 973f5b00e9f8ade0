// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;       // processor backends
pub mod capabilities;   // clipboard, downloads
pub mod config;         // pipeline config + runtime
pub mod engine;         // chain executor
pub mod envelope;       // request/response/metadata
pub mod errors;         // error handling
pub mod observability;
pub mod storage;        // bounded stores
pub mod tools;          // the text tools themselves
pub mod traits;         // unified abstractions
pub mod utils;
