// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod metadata;
pub mod random;

pub use metadata::flatten_metadata;
pub use random::{cosmetic_rng, secure_rng};
