// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Random identifiers for sessions and locally stored documents.

use anyhow::anyhow;
use ring::rand::{SecureRandom, SystemRandom};

/// Hex-encode `len` bytes from the system CSPRNG.
pub fn random_hex(len: usize) -> anyhow::Result<String> {
    let mut buf = vec![0u8; len];
    SystemRandom::new()
        .fill(&mut buf)
        .map_err(|_| anyhow!("system random source unavailable"))?;
    Ok(hex::encode(buf))
}
