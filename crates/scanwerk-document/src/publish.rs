// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Publish — the only write outside the workspace.
//
// The assembled PDF is copied into a temporary file beside the destination,
// checked against the source digest, and then linked into place without
// replacing anything. Readers of the output directory either see no file or
// the complete one. The staged copy is tracked as scratch for as long as it
// exists, so an interrupt removes it too.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use scanwerk_core::error::{Result, ScanwerkError};
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

use crate::integrity;
use crate::workspace::{SCRATCH, ScratchRegistry, Tracked};

/// What ended up at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// A verified copy of the assembled PDF waiting in the output directory.
#[derive(Debug)]
pub struct Staged<'r> {
    file: NamedTempFile,
    _tracked: Tracked<'r>,
    bytes: u64,
    sha256: String,
}

impl Staged<'_> {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Link the staged copy to `destination`, refusing to overwrite.
    pub fn persist(self, destination: &Path) -> Result<Published> {
        let Staged {
            file,
            _tracked,
            bytes,
            sha256,
        } = self;

        file.persist_noclobber(destination).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                ScanwerkError::OutputExists(destination.to_path_buf())
            } else {
                ScanwerkError::Publish {
                    path: destination.to_path_buf(),
                    reason: e.error.to_string(),
                }
            }
        })?;

        info!(bytes, sha256 = %sha256, "published");
        Ok(Published {
            path: destination.to_path_buf(),
            bytes,
            sha256,
        })
    }
}

/// Copy `source` into a tracked temporary file inside `dir` and verify it.
pub fn stage<'r>(source: &Path, dir: &Path, registry: &'r ScratchRegistry) -> Result<Staged<'r>> {
    let staging_err = |reason: String| ScanwerkError::Publish {
        path: dir.to_path_buf(),
        reason,
    };

    let sha256 = integrity::hash_file(source)?;

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| staging_err(format!("cannot stage in {}: {e}", dir.display())))?;
    let tracked = registry.track(file.path());

    let bytes = io::copy(&mut File::open(source)?, file.as_file_mut())
        .map_err(|e| staging_err(format!("copy failed: {e}")))?;
    file.as_file()
        .sync_all()
        .map_err(|e| staging_err(format!("sync failed: {e}")))?;

    if let Err(e) = copy_permissions(source, file.path()) {
        warn!(error = %e, "could not copy permissions to the published file");
    }

    integrity::verify_file(file.path(), &sha256)?;

    Ok(Staged {
        file,
        _tracked: tracked,
        bytes,
        sha256,
    })
}

/// Copy `source` to `destination`, refusing to overwrite an existing file.
#[instrument(skip_all, fields(destination = %destination.display()))]
pub fn publish(source: &Path, destination: &Path) -> Result<Published> {
    let dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    stage(source, dir, &SCRATCH)?.persist(destination)
}

/// Staged files are private to the owner; give them the permissions the
/// source was created with. Some filesystems (vfat, cifs) refuse this.
fn copy_permissions(source: &Path, staged: &Path) -> io::Result<()> {
    fs::set_permissions(staged, fs::metadata(source)?.permissions())
}
