// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration and its layered resolution.
//
// Precedence, lowest to highest: built-in defaults, the command-line layer
// (each flag falling back to its `SCANNER_*` environment variable), and
// finally an interactive prompt for the page count when nothing else set it.

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, ScanwerkError};
use crate::prompt::{self, Prompter};

/// Extension every output file carries.
pub const PDF_EXTENSION: &str = ".pdf";

/// SANE scan mode. Drivers accept their own mode names, so anything
/// unrecognised is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Color,
    Gray,
    Lineart,
    Other(String),
}

impl ColorMode {
    pub fn as_str(&self) -> &str {
        match self {
            ColorMode::Color => "Color",
            ColorMode::Gray => "Gray",
            ColorMode::Lineart => "Lineart",
            ColorMode::Other(mode) => mode,
        }
    }
}

impl From<&str> for ColorMode {
    fn from(s: &str) -> Self {
        match s {
            "Color" => ColorMode::Color,
            "Gray" => ColorMode::Gray,
            "Lineart" => ColorMode::Lineart,
            other => ColorMode::Other(other.to_owned()),
        }
    }
}

impl FromStr for ColorMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ColorMode::from(s))
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved settings for one run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// SANE device name; `None` lets the driver pick its default device.
    pub device: Option<String>,
    pub resolution: u32,
    pub brightness: i32,
    pub contrast: i32,
    pub mode: ColorMode,
    /// Produce image-only PDFs instead of running OCR.
    pub no_ocr: bool,
    pub pages: NonZeroU32,
    /// Existing directory the final PDF is written to.
    pub output_dir: PathBuf,
    /// Output filename, always ending in `.pdf`.
    pub filename: String,
}

impl ScanConfig {
    pub const DEFAULT_RESOLUTION: u32 = 150;
    pub const DEFAULT_BRIGHTNESS: i32 = 0;
    pub const DEFAULT_CONTRAST: i32 = 0;

    /// Config with every scan parameter at its default.
    pub fn new(filename: &str, pages: NonZeroU32) -> Self {
        Self {
            device: None,
            resolution: Self::DEFAULT_RESOLUTION,
            brightness: Self::DEFAULT_BRIGHTNESS,
            contrast: Self::DEFAULT_CONTRAST,
            mode: ColorMode::default(),
            no_ocr: false,
            pages,
            output_dir: PathBuf::from("."),
            filename: normalize_filename(filename),
        }
    }

    /// Where the finished document lands.
    pub fn final_output(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }

    pub fn ocr_enabled(&self) -> bool {
        !self.no_ocr
    }
}

/// Append `.pdf` unless the name already ends with it.
pub fn normalize_filename(filename: &str) -> String {
    if filename.ends_with(PDF_EXTENSION) {
        filename.to_owned()
    } else {
        format!("{filename}{PDF_EXTENSION}")
    }
}

/// Settings supplied by the operator. Unset fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub device: Option<String>,
    pub resolution: Option<u32>,
    pub brightness: Option<i32>,
    pub contrast: Option<i32>,
    pub mode: Option<ColorMode>,
    pub pages: Option<NonZeroU32>,
    pub output_dir: Option<PathBuf>,
    pub no_ocr: Option<bool>,
}

/// Resolve the final [`ScanConfig`] from the operator's layer.
///
/// The output directory is validated before the operator is asked anything,
/// so a bad directory never costs them a prompt.
pub fn resolve(
    filename: &str,
    layer: ConfigLayer,
    prompter: &mut dyn Prompter,
) -> Result<ScanConfig> {
    let output_dir = layer.output_dir.unwrap_or_else(|| PathBuf::from("."));
    check_output_dir(&output_dir)?;

    if filename.trim().is_empty() {
        return Err(ScanwerkError::Config {
            field: "filename",
            value: filename.to_owned(),
            reason: "must not be empty".into(),
        });
    }

    let pages = match layer.pages {
        Some(pages) => pages,
        None => prompt::ask_page_count(prompter)?,
    };

    Ok(ScanConfig {
        device: layer.device,
        resolution: layer.resolution.unwrap_or(ScanConfig::DEFAULT_RESOLUTION),
        brightness: layer.brightness.unwrap_or(ScanConfig::DEFAULT_BRIGHTNESS),
        contrast: layer.contrast.unwrap_or(ScanConfig::DEFAULT_CONTRAST),
        mode: layer.mode.unwrap_or_default(),
        no_ocr: layer.no_ocr.unwrap_or(false),
        pages,
        output_dir,
        filename: normalize_filename(filename),
    })
}

fn check_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ScanwerkError::OutputDirectory(dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn pages(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("non-zero")
    }

    #[test]
    fn filename_gets_exactly_one_suffix() {
        assert_eq!(normalize_filename("report"), "report.pdf");
        assert_eq!(normalize_filename("scan.pdf"), "scan.pdf");
        assert_eq!(normalize_filename("archive.PDF"), "archive.PDF.pdf");
    }

    #[test]
    fn defaults_apply_when_no_layer_sets_a_value() {
        let mut prompter = ScriptedPrompter::new(["2"]);
        let config = resolve("report", ConfigLayer::default(), &mut prompter).expect("resolve");

        assert_eq!(config, ScanConfig::new("report", pages(2)));
        assert_eq!(config.final_output(), PathBuf::from("./report.pdf"));
        assert!(config.ocr_enabled());
        assert_eq!(prompter.asked(), ["Pages: "]);
    }

    #[test]
    fn layer_values_replace_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let layer = ConfigLayer {
            device: Some("epson2:libusb:001:004".into()),
            resolution: Some(600),
            brightness: Some(-10),
            contrast: Some(5),
            mode: Some(ColorMode::Gray),
            pages: Some(pages(1)),
            output_dir: Some(tmp.path().to_path_buf()),
            no_ocr: Some(true),
        };

        let mut prompter = ScriptedPrompter::default();
        let config = resolve("out", layer, &mut prompter).expect("resolve");

        assert_eq!(config.device.as_deref(), Some("epson2:libusb:001:004"));
        assert_eq!(config.resolution, 600);
        assert_eq!(config.brightness, -10);
        assert_eq!(config.contrast, 5);
        assert_eq!(config.mode, ColorMode::Gray);
        assert!(!config.ocr_enabled());
        assert_eq!(config.final_output(), tmp.path().join("out.pdf"));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn missing_output_directory_is_rejected_before_prompting() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let layer = ConfigLayer {
            output_dir: Some(tmp.path().join("does-not-exist")),
            ..ConfigLayer::default()
        };
        let mut prompter = ScriptedPrompter::new(["1"]);
        let err = resolve("a", layer, &mut prompter).unwrap_err();
        assert!(matches!(err, ScanwerkError::OutputDirectory(_)));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn empty_filename_is_rejected() {
        let mut prompter = ScriptedPrompter::new(["1"]);
        let err = resolve("  ", ConfigLayer::default(), &mut prompter).unwrap_err();
        assert!(matches!(err, ScanwerkError::Config { field: "filename", .. }));
    }

    #[test]
    fn unknown_modes_pass_through() {
        let mode = ColorMode::from("Halftone");
        assert_eq!(mode, ColorMode::Other("Halftone".into()));
        assert_eq!(mode.to_string(), "Halftone");
    }
}
