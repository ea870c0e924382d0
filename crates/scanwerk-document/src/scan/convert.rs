// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion — turn each captured raster into a single-page PDF.
//
// With OCR the Tesseract `pdf` config embeds the recognised text as an
// invisible layer over the image; without it ImageMagick wraps the image
// alone.

use std::path::PathBuf;

use scanwerk_core::config::ScanConfig;
use scanwerk_core::error::Result;
use scanwerk_core::types::{PageArtifact, Stage, StepLocation};
use tracing::{debug, info, instrument};

use crate::tools::ExternalTool;
use crate::tools::runner::{self, CommandRunner, Invocation};

/// How rasters become PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Searchable PDF through `tesseract`.
    Ocr,
    /// Image-only PDF through `convert`.
    Plain,
}

impl ConversionMode {
    pub fn for_config(config: &ScanConfig) -> Self {
        if config.ocr_enabled() {
            ConversionMode::Ocr
        } else {
            ConversionMode::Plain
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            ConversionMode::Ocr => Stage::Ocr,
            ConversionMode::Plain => Stage::Convert,
        }
    }

    /// Program call producing `artifact.pdf` from `artifact.raster`.
    pub fn invocation(self, artifact: &PageArtifact) -> Invocation {
        match self {
            // tesseract appends `.pdf` to the output base itself.
            ConversionMode::Ocr => Invocation::new(ExternalTool::Tesseract)
                .arg(&artifact.raster)
                .arg(artifact.pdf_base())
                .arg("pdf"),
            ConversionMode::Plain => Invocation::new(ExternalTool::Convert)
                .arg(&artifact.raster)
                .arg(&artifact.pdf),
        }
    }
}

/// Convert one page and check its PDF exists.
#[instrument(skip_all, fields(page = artifact.number(), mode = ?mode))]
pub fn convert_page(
    runner: &dyn CommandRunner,
    mode: ConversionMode,
    artifact: &PageArtifact,
) -> Result<PathBuf> {
    let at = StepLocation::page(mode.stage(), artifact.index);

    runner::run_step(runner, &mode.invocation(artifact), at)?;
    let bytes = runner::expect_artifact(&artifact.pdf, at)?;

    debug!(bytes, "page converted");
    Ok(artifact.pdf.clone())
}

/// Convert every page in capture order, returning the PDFs in that order.
pub fn convert_pages(
    runner: &dyn CommandRunner,
    mode: ConversionMode,
    artifacts: &[PageArtifact],
) -> Result<Vec<PathBuf>> {
    let pdfs = artifacts
        .iter()
        .map(|artifact| convert_page(runner, mode, artifact))
        .collect::<Result<Vec<_>>>()?;

    info!(pages = pdfs.len(), ?mode, "all pages converted");
    Ok(pdfs)
}
