// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The two randomness capabilities.
//!
//! Cosmetic generators (lorem ipsum, permalink suffixes) take any [`rand::Rng`];
//! the password generator requires [`rand::CryptoRng`] so a fast, predictable
//! generator cannot be passed to it by mistake.

use rand::rngs::{SmallRng, ThreadRng};
use rand::SeedableRng;

/// Fast non-cryptographic generator for placeholder text and identifiers.
pub fn cosmetic_rng() -> SmallRng {
    SmallRng::from_os_rng()
}

/// Thread-local CSPRNG seeded from the operating system.
pub fn secure_rng() -> ThreadRng {
    rand::rng()
}
