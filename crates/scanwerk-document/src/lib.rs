// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-document — The capture-and-assemble pipeline.
//
// Drives the external programs (SANE `scanimage`, `tesseract`, ImageMagick
// `convert`, Ghostscript `gs`) page by page inside a scoped temporary
// workspace, verifies what they produce, and publishes one PDF.

pub mod integrity;
pub mod pdf;
pub mod pipeline;
pub mod publish;
pub mod scan;
pub mod tools;
pub mod workspace;

// Re-export the primary types so callers can use `scanwerk_document::Pipeline` etc.
pub use pdf::reader::PdfReader;
pub use pipeline::{Outcome, Pipeline};
pub use tools::preflight::{PathLocator, ToolLocator, preflight};
pub use tools::runner::{CommandRunner, SystemRunner};
pub use tools::ExternalTool;
pub use workspace::Workspace;
