// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanwerk pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline stages, used to locate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Raster capture through the scan driver.
    Scan,
    /// Searchable PDF through the OCR engine.
    Ocr,
    /// Image-only PDF through the plain converter.
    Convert,
    /// Multi-page assembly through the compositor.
    Merge,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Ocr => "ocr",
            Stage::Convert => "convert",
            Stage::Merge => "merge",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the pipeline something happened: a stage, and the 0-based page
/// index for per-page stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLocation {
    pub stage: Stage,
    pub page: Option<usize>,
}

impl StepLocation {
    pub fn page(stage: Stage, index: usize) -> Self {
        Self {
            stage,
            page: Some(index),
        }
    }

    pub fn document(stage: Stage) -> Self {
        Self { stage, page: None }
    }
}

impl fmt::Display for StepLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(index) => write!(f, "{} of page {}", self.stage, index + 1),
            None => write!(f, "{}", self.stage),
        }
    }
}

/// One scanned page: its raster file and the PDF derived from it.
///
/// Artifacts are created in index order and must reach the compositor in that
/// same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArtifact {
    /// 0-based page index.
    pub index: usize,
    /// `page_<index>.tiff` inside the workspace.
    pub raster: PathBuf,
    /// `page_<index>.pdf` inside the workspace.
    pub pdf: PathBuf,
}

impl PageArtifact {
    /// Artifact paths for page `index` inside `workspace`.
    pub fn in_workspace(workspace: &Path, index: usize) -> Self {
        let raster = workspace.join(format!("page_{index}.tiff"));
        let pdf = raster.with_extension("pdf");
        Self { index, raster, pdf }
    }

    /// Base path (raster path without extension), as the OCR engine expects
    /// its output name.
    pub fn pdf_base(&self) -> PathBuf {
        self.raster.with_extension("")
    }

    /// 1-based page number shown to the operator.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub pages: u32,
    /// Whether pages went through the OCR engine.
    pub ocr: bool,
    /// Whether the compositor ran (false for single-page documents).
    pub merged: bool,
    pub output: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}
