// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scoped temporary workspace for one run's intermediate files.
//
// The directory is removed when the `Workspace` drops, whether the run
// succeeded or failed. Every scratch path a run creates (the workspace and the
// staged copy in the output directory) is also tracked in a registry so an
// interrupt handler can delete them before the process exits, since
// destructors do not run on SIGINT.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use scanwerk_core::error::Result;
use scanwerk_core::types::PageArtifact;
use tempfile::TempDir;
use tracing::{debug, warn};

const PREFIX: &str = "scanwerk-";

/// The registry the binary's interrupt handler drains.
pub static SCRATCH: ScratchRegistry = ScratchRegistry::new();

/// Scratch files and directories that must not outlive the process.
#[derive(Debug, Default)]
pub struct ScratchRegistry {
    paths: Mutex<Vec<PathBuf>>,
}

impl ScratchRegistry {
    pub const fn new() -> Self {
        Self {
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Track `path` until the returned guard drops.
    pub fn track(&self, path: &Path) -> Tracked<'_> {
        self.paths().push(path.to_path_buf());
        Tracked {
            registry: self,
            path: path.to_path_buf(),
        }
    }

    /// Delete every tracked path and forget it. Meant for interrupt handlers
    /// that are about to exit the process.
    pub fn remove_all(&self) {
        let paths = std::mem::take(&mut *self.paths());
        for path in paths {
            remove_scratch(&path);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> Vec<PathBuf> {
        self.paths().clone()
    }

    fn paths(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration of one scratch path; dropping it stops tracking.
#[derive(Debug)]
pub struct Tracked<'r> {
    registry: &'r ScratchRegistry,
    path: PathBuf,
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.registry.paths().retain(|tracked| tracked != &self.path);
    }
}

fn remove_scratch(path: &Path) {
    let removed = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match removed {
        Ok(()) => debug!(path = %path.display(), "scratch path removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove scratch path"),
    }
}

/// Process-private temporary directory owning every page artifact.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    _tracked: Tracked<'static>,
}

impl Workspace {
    /// Create a workspace under the system temporary directory.
    pub fn create() -> Result<Self> {
        Ok(Self::tracked_by(
            tempfile::Builder::new().prefix(PREFIX).tempdir()?,
            &SCRATCH,
        ))
    }

    /// Create a workspace under `parent`.
    pub fn create_in(parent: impl AsRef<Path>) -> Result<Self> {
        Self::create_in_registry(parent, &SCRATCH)
    }

    pub(crate) fn create_in_registry(
        parent: impl AsRef<Path>,
        registry: &'static ScratchRegistry,
    ) -> Result<Self> {
        Ok(Self::tracked_by(
            tempfile::Builder::new().prefix(PREFIX).tempdir_in(parent)?,
            registry,
        ))
    }

    fn tracked_by(dir: TempDir, registry: &'static ScratchRegistry) -> Self {
        debug!(path = %dir.path().display(), "workspace created");
        let tracked = registry.track(dir.path());
        Self {
            dir,
            _tracked: tracked,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Artifact paths for page `index`.
    pub fn artifact(&self, index: usize) -> PageArtifact {
        PageArtifact::in_workspace(self.path(), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_is_removed_on_drop() {
        static REGISTRY: ScratchRegistry = ScratchRegistry::new();
        let parent = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::create_in_registry(parent.path(), &REGISTRY).expect("workspace");
        let path = workspace.path().to_path_buf();
        std::fs::write(workspace.artifact(0).raster, b"raster").expect("write");

        assert!(path.is_dir());
        assert_eq!(REGISTRY.tracked(), [path.clone()]);

        drop(workspace);
        assert!(!path.exists());
        assert!(REGISTRY.tracked().is_empty());
    }

    #[test]
    fn remove_all_deletes_workspaces_and_staged_files() {
        static REGISTRY: ScratchRegistry = ScratchRegistry::new();
        let parent = tempfile::tempdir().expect("tempdir");
        let output_dir = tempfile::tempdir().expect("tempdir");

        let workspace = Workspace::create_in_registry(parent.path(), &REGISTRY).expect("workspace");
        let workspace_path = workspace.path().to_path_buf();
        std::fs::write(workspace.artifact(0).pdf, b"%PDF").expect("write");

        let staged = tempfile::NamedTempFile::new_in(output_dir.path()).expect("staged");
        let staged_tracking = REGISTRY.track(staged.path());

        REGISTRY.remove_all();

        assert!(!workspace_path.exists());
        assert!(!staged.path().exists());
        assert!(REGISTRY.tracked().is_empty());

        // The owners still drop cleanly after their paths are gone.
        drop(staged_tracking);
        drop(staged);
        drop(workspace);
        assert_eq!(
            std::fs::read_dir(output_dir.path()).expect("read_dir").count(),
            0
        );
    }

    #[test]
    fn already_removed_paths_are_skipped() {
        static REGISTRY: ScratchRegistry = ScratchRegistry::new();
        let parent = tempfile::tempdir().expect("tempdir");
        let gone = parent.path().join("page_0.tiff");
        let _tracking = REGISTRY.track(&gone);

        REGISTRY.remove_all();
        assert!(REGISTRY.tracked().is_empty());
    }

    #[test]
    fn workspace_name_carries_prefix() {
        let parent = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::create_in(parent.path()).expect("workspace");
        let name = workspace
            .path()
            .file_name()
            .expect("name")
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with(PREFIX));
        assert_eq!(workspace.path().parent(), Some(parent.path()));
        assert!(SCRATCH.tracked().contains(&workspace.path().to_path_buf()));
    }

    #[test]
    fn artifacts_live_inside_workspace() {
        let parent = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::create_in(parent.path()).expect("workspace");
        let artifact = workspace.artifact(1);
        assert_eq!(artifact.raster, workspace.path().join("page_1.tiff"));
        assert_eq!(artifact.pdf, workspace.path().join("page_1.pdf"));
    }
}
