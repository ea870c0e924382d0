// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document integrity — SHA-256 fingerprints of published PDFs.

use std::fs::File;
use std::io;
use std::path::Path;

use scanwerk_core::error::{Result, ScanwerkError};
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
#[cfg(test)]
pub(crate) fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Stream `path` through SHA-256 without loading it into memory.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Verify that the file at `path` matches the expected SHA-256 hex digest.
pub fn verify_file(path: &Path, expected_hex: &str) -> Result<()> {
    let actual = hash_file(path)?;
    if actual == expected_hex {
        Ok(())
    } else {
        Err(ScanwerkError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}
