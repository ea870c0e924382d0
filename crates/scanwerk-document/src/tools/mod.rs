// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External programs — what they are called, how to find them, how to run them.

pub mod preflight;
pub mod runner;

#[cfg(test)]
pub(crate) mod fake;

use std::fmt;

/// The four programs the pipeline shells out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalTool {
    /// ImageMagick plain image-to-PDF converter.
    Convert,
    /// Tesseract OCR engine.
    Tesseract,
    /// SANE command-line scan driver.
    ScanImage,
    /// Ghostscript PDF compositor.
    Ghostscript,
}

impl ExternalTool {
    /// Every required tool, in the order preflight checks them.
    pub const REQUIRED: [ExternalTool; 4] = [
        ExternalTool::Convert,
        ExternalTool::Tesseract,
        ExternalTool::ScanImage,
        ExternalTool::Ghostscript,
    ];

    /// Executable name looked up on `PATH`.
    pub fn program(self) -> &'static str {
        match self {
            ExternalTool::Convert => "convert",
            ExternalTool::Tesseract => "tesseract",
            ExternalTool::ScanImage => "scanimage",
            ExternalTool::Ghostscript => "gs",
        }
    }

    /// Error line reported when the tool is absent.
    pub fn missing_message(self) -> &'static str {
        match self {
            ExternalTool::Convert => "ImageMagick command convert is not installed",
            ExternalTool::Tesseract => "Tesseract is not installed",
            ExternalTool::ScanImage => "Sane is not installed",
            ExternalTool::Ghostscript => "Ghostscript is not installed",
        }
    }
}

impl fmt::Display for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
