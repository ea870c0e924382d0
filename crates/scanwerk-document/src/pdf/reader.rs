// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open assembled documents with `lopdf` and check their page
// tree before anything is published.

use std::path::Path;

use lopdf::Document;
use scanwerk_core::error::{Result, ScanwerkError};
use tracing::{debug, instrument};

/// Read-only view of a PDF produced by one of the external tools.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, for diagnostics.
    source_path: String,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();

        let document = Document::load(path_ref).map_err(|err| {
            ScanwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: path_ref.display().to_string(),
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Fail unless the document holds at least `expected` pages.
    pub fn expect_pages(&self, expected: usize) -> Result<()> {
        let actual = self.page_count();
        if actual >= expected {
            Ok(())
        } else {
            Err(ScanwerkError::PdfError(format!(
                "{} has {} page(s), expected {}",
                self.source_path, actual, expected
            )))
        }
    }
}
