// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — assembling per-page PDFs and checking the result.

pub mod compose;
pub mod reader;

pub use compose::{Assembled, assemble};
pub use reader::PdfReader;
