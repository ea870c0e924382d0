// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line flags. Each flag falls back to its `SCANNER_*` environment
// variable, which clap only reads when the flag itself is absent. Anything
// still unset takes the built-in default in `config::resolve`.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;
use scanwerk_core::config::{ColorMode, ConfigLayer};

#[derive(Debug, Parser)]
#[command(name = "scanwerk")]
#[command(version, about = "Scan pages through SANE and assemble them into one PDF", long_about = None)]
pub struct Args {
    /// Output file name; `.pdf` is appended when missing
    #[arg(value_name = "FILENAME")]
    pub filename: String,

    /// SANE device name (scanner default when omitted)
    #[arg(short = 'd', long, value_name = "DEVICE", env = "SCANNER_SANE_DEVICE")]
    pub sane_device: Option<String>,

    /// Scan resolution in DPI [default: 150]
    #[arg(short = 'r', long, value_name = "DPI", env = "SCANNER_SANE_RESOLUTION")]
    pub sane_resolution: Option<u32>,

    /// Scanner brightness [default: 0]
    #[arg(
        short = 'b',
        long,
        value_name = "N",
        env = "SCANNER_SANE_BRIGHTNESS",
        allow_hyphen_values = true
    )]
    pub sane_brightness: Option<i32>,

    /// Scanner contrast [default: 0]
    #[arg(
        short = 'c',
        long,
        value_name = "N",
        env = "SCANNER_SANE_CONTRAST",
        allow_hyphen_values = true
    )]
    pub sane_contrast: Option<i32>,

    /// Scan mode: Color, Gray, Lineart, or a driver-specific mode [default: Color]
    #[arg(short = 'm', long, value_name = "MODE", env = "SCANNER_SANE_MODE")]
    pub sane_mode: Option<ColorMode>,

    /// Number of pages (asked interactively when omitted)
    #[arg(short = 'p', long, value_name = "N", env = "SCANNER_PAGES")]
    pub pages: Option<NonZeroU32>,

    /// Directory the PDF is written to [default: .]
    #[arg(short = 'o', long, value_name = "DIR", env = "SCANNER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip OCR and wrap the scans in a plain image PDF
    #[arg(
        short = 'n',
        long,
        env = "SCANNER_NO_OCR",
        value_parser = BoolishValueParser::new()
    )]
    pub no_ocr: bool,

    /// Print a JSON run report on stdout after publishing
    #[arg(long)]
    pub json: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// The operator's configuration layer.
    ///
    /// Empty text values, such as `SCANNER_SANE_DEVICE=`, count as unset.
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            device: non_empty(self.sane_device.clone()),
            resolution: self.sane_resolution,
            brightness: self.sane_brightness,
            contrast: self.sane_contrast,
            mode: self
                .sane_mode
                .clone()
                .filter(|mode| !mode.as_str().is_empty()),
            pages: self.pages,
            output_dir: self
                .output_dir
                .clone()
                .filter(|dir| !dir.as_os_str().is_empty()),
            no_ocr: Some(self.no_ocr),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
