// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanwerk.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::StepLocation;

/// Top-level error type for all Scanwerk operations.
#[derive(Debug, Error)]
pub enum ScanwerkError {
    // -- Environment --
    #[error("required programs are not installed: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    // -- Configuration --
    #[error("invalid {field} {value:?}: {reason}")]
    Config {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("output directory {} does not exist or is not a directory", .0.display())]
    OutputDirectory(PathBuf),

    #[error("input closed while waiting for {0}")]
    PromptClosed(String),

    // -- External tools --
    #[error("{at}: {program} {status}{}", stderr_tail(.stderr))]
    ToolFailed {
        at: StepLocation,
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{at}: expected output {} is missing or empty", .path.display())]
    MissingArtifact { at: StepLocation, path: PathBuf },

    #[error("{at}: could not launch {program}: {source}")]
    Launch {
        at: StepLocation,
        program: String,
        #[source]
        source: std::io::Error,
    },

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Publish --
    #[error("output pdf {} already exists", .0.display())]
    OutputExists(PathBuf),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("could not publish to {}: {reason}", .path.display())]
    Publish { path: PathBuf, reason: String },

    // -- I/O and serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanwerkError>;

/// Trailing `: <last stderr line>` for tool failures, or nothing when the tool
/// was silent.
fn stderr_tail(stderr: &str) -> String {
    match stderr.lines().rev().find(|line| !line.trim().is_empty()) {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    #[test]
    fn tool_failure_names_stage_and_page() {
        let err = ScanwerkError::ToolFailed {
            at: StepLocation::page(Stage::Scan, 1),
            program: "scanimage".into(),
            status: "exited with code 9".into(),
            stderr: "scanimage: open of device failed\n\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "scan of page 2: scanimage exited with code 9: scanimage: open of device failed"
        );
    }

    #[test]
    fn tool_failure_without_stderr() {
        let err = ScanwerkError::ToolFailed {
            at: StepLocation::document(Stage::Merge),
            program: "gs".into(),
            status: "exited with code 1".into(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "merge: gs exited with code 1");
    }

    #[test]
    fn missing_tools_lists_every_program() {
        let err = ScanwerkError::MissingTools(vec!["gs".into(), "convert".into()]);
        assert_eq!(
            err.to_string(),
            "required programs are not installed: gs, convert"
        );
    }
}
