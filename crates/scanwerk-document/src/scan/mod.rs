// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — raster capture through SANE, then per-page conversion
// to PDF with or without optical character recognition (OCR).

pub mod capture;
pub mod convert;

pub use capture::capture_pages;
pub use convert::{ConversionMode, convert_pages};
