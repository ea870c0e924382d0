// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-English explanations for pipeline failures.
//
// The technical error says what broke; the suggestion says what the operator
// can do about it at the scanner or the terminal.

use crate::error::ScanwerkError;
use crate::types::Stage;

/// A human-readable error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary of what went wrong.
    pub message: String,
    /// What the operator should try next.
    pub suggestion: String,
}

impl HumanError {
    fn new(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Convert a `ScanwerkError` into something an operator can act on.
pub fn humanize_error(err: &ScanwerkError) -> HumanError {
    match err {
        ScanwerkError::MissingTools(programs) => HumanError::new(
            "Some of the programs Scanwerk drives are not installed.",
            format!(
                "Install {} (packages: sane-utils, tesseract-ocr, imagemagick, ghostscript).",
                programs.join(", ")
            ),
        ),

        ScanwerkError::Config { field, .. } => HumanError::new(
            format!("The value given for {field} can't be used."),
            "Check the command line and try again.",
        ),

        ScanwerkError::OutputDirectory(_) => HumanError::new(
            "The output directory doesn't exist.",
            "Create the directory first, or pass a different one with --output-dir.",
        ),

        ScanwerkError::PromptClosed(_) => HumanError::new(
            "Scanwerk needed an answer but the input was closed.",
            "Run Scanwerk from an interactive terminal, or pass --pages.",
        ),

        ScanwerkError::ToolFailed { at, .. }
        | ScanwerkError::MissingArtifact { at, .. }
        | ScanwerkError::Launch { at, .. } => humanize_stage(at.stage),

        ScanwerkError::ImageError(_) => HumanError::new(
            "The scanner returned an image that can't be read.",
            "Check the scanner connection and --sane-mode, then scan again.",
        ),

        ScanwerkError::PdfError(_) => HumanError::new(
            "The assembled PDF is incomplete.",
            "Run again with --verbose to see the Ghostscript command line.",
        ),

        ScanwerkError::OutputExists(_) => HumanError::new(
            "A file with that name already exists.",
            "Choose another filename or move the existing file out of the way.",
        ),

        ScanwerkError::IntegrityMismatch { .. } | ScanwerkError::Publish { .. } => {
            HumanError::new(
                "The finished PDF couldn't be saved.",
                "Check free space and permissions in the output directory.",
            )
        }

        ScanwerkError::Io(_) | ScanwerkError::Serialization(_) => HumanError::new(
            "Something went wrong reading or writing files.",
            "Check free space in the temporary directory and try again.",
        ),
    }
}

fn humanize_stage(stage: Stage) -> HumanError {
    match stage {
        Stage::Scan => HumanError::new(
            "The scanner didn't produce a page.",
            "Make sure the scanner is on and connected; `scanimage -L` lists the devices SANE can see.",
        ),
        Stage::Ocr => HumanError::new(
            "Text recognition failed on a page.",
            "Check the Tesseract installation and its language data, or use --no-ocr.",
        ),
        Stage::Convert => HumanError::new(
            "A page couldn't be turned into a PDF.",
            "ImageMagick's security policy may block PDF output; check /etc/ImageMagick-*/policy.xml.",
        ),
        Stage::Merge => HumanError::new(
            "The pages couldn't be combined into one PDF.",
            "Check the Ghostscript installation.",
        ),
    }
}
