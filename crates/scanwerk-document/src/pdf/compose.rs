// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembly — merge per-page PDFs into one document with Ghostscript.
//
// The compositor options are fixed: pdfwrite at compatibility level 1.4,
// default quality, duplicate image detection, compressed fonts, 150 DPI, and
// batch mode so `gs` never waits for input.

use std::path::{Path, PathBuf};

use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::{Stage, StepLocation};
use tracing::{debug, info, instrument};

use super::reader::PdfReader;
use crate::tools::ExternalTool;
use crate::tools::runner::{self, CommandRunner, Invocation};

/// Fixed Ghostscript options for every merge.
pub const GS_OPTIONS: [&str; 9] = [
    "-sDEVICE=pdfwrite",
    "-dCompatibilityLevel=1.4",
    "-dPDFSETTINGS=/default",
    "-dNOPAUSE",
    "-dQUIET",
    "-dBATCH",
    "-dDetectDuplicateImages",
    "-dCompressFonts=true",
    "-r150",
];

/// Name of the merged document inside the workspace.
pub const MERGED_FILENAME: &str = "final.pdf";

/// The single file that represents the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// One page: its PDF is the document.
    Single(PathBuf),
    /// Several pages merged by the compositor.
    Merged(PathBuf),
}

impl Assembled {
    pub fn path(&self) -> &Path {
        match self {
            Assembled::Single(path) | Assembled::Merged(path) => path,
        }
    }

    pub fn merged(&self) -> bool {
        matches!(self, Assembled::Merged(_))
    }
}

/// `gs` call writing `output` from `inputs`, in the given order.
pub fn merge_invocation(output: &Path, inputs: &[PathBuf]) -> Invocation {
    let mut output_arg = std::ffi::OsString::from("-sOutputFile=");
    output_arg.push(output);

    Invocation::new(ExternalTool::Ghostscript)
        .args(GS_OPTIONS)
        .arg(output_arg)
        .args(inputs)
}

/// Produce one document from the ordered per-page PDFs.
///
/// A single page is used as-is; anything more goes through the compositor
/// into `workspace/final.pdf`. Either way the result is opened with `lopdf`
/// and must hold at least one page per input.
#[instrument(skip_all, fields(pages = pdfs.len()))]
pub fn assemble(
    runner: &dyn CommandRunner,
    pdfs: &[PathBuf],
    workspace: &Path,
) -> Result<Assembled> {
    let at = StepLocation::document(Stage::Merge);

    let assembled = match pdfs {
        [] => {
            return Err(ScanwerkError::PdfError("no pages to assemble".into()));
        }
        [single] => {
            debug!(path = %single.display(), "single page, no merge needed");
            Assembled::Single(single.clone())
        }
        _ => {
            let output = workspace.join(MERGED_FILENAME);
            let invocation = merge_invocation(&output, pdfs);
            info!(inputs = pdfs.len(), "merging pages");
            runner::run_step(runner, &invocation, at)?;
            runner::expect_artifact(&output, at)?;
            Assembled::Merged(output)
        }
    };

    PdfReader::open(assembled.path())?.expect_pages(pdfs.len())?;
    Ok(assembled)
}
