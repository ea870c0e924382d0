// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test double for the external programs.
//
// Records every invocation and writes the files the real tools would: a small
// TIFF for `scanimage`, single-page PDFs for `tesseract` and `convert`, and an
// N-page PDF for `gs`. Each PDF carries a label in its content stream so tests
// can tell which tool produced it.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

use super::ExternalTool;
use super::runner::{CommandRunner, Invocation, ToolOutput};

struct Failure {
    /// Fail only on this 0-based call to the tool; `None` fails every call.
    on_call: Option<usize>,
    code: i32,
    stderr: String,
}

#[derive(Default)]
pub(crate) struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    failures: HashMap<ExternalTool, Failure>,
    unlaunchable: HashSet<ExternalTool>,
    silent: HashSet<ExternalTool>,
    corrupt: HashSet<ExternalTool>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call to `tool` exits with `code`.
    pub(crate) fn fail(mut self, tool: ExternalTool, code: i32, stderr: &str) -> Self {
        self.failures.insert(
            tool,
            Failure {
                on_call: None,
                code,
                stderr: stderr.to_owned(),
            },
        );
        self
    }

    /// Only the `nth` (0-based) call to `tool` exits with `code`.
    pub(crate) fn fail_on(
        mut self,
        tool: ExternalTool,
        nth: usize,
        code: i32,
        stderr: &str,
    ) -> Self {
        self.failures.insert(
            tool,
            Failure {
                on_call: Some(nth),
                code,
                stderr: stderr.to_owned(),
            },
        );
        self
    }

    /// `tool` cannot be started at all.
    pub(crate) fn unlaunchable(mut self, tool: ExternalTool) -> Self {
        self.unlaunchable.insert(tool);
        self
    }

    /// `tool` exits successfully without writing its output file.
    pub(crate) fn silent(mut self, tool: ExternalTool) -> Self {
        self.silent.insert(tool);
        self
    }

    /// `tool` exits successfully but writes bytes no reader understands.
    pub(crate) fn corrupt(mut self, tool: ExternalTool) -> Self {
        self.corrupt.insert(tool);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn calls_to(&self, tool: ExternalTool) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.tool == tool)
            .cloned()
            .collect()
    }

    fn previous_calls_to(&self, tool: ExternalTool) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.tool == tool)
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        let nth = self.previous_calls_to(invocation.tool);
        self.calls.borrow_mut().push(invocation.clone());

        if self.unlaunchable.contains(&invocation.tool) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", invocation.tool),
            ));
        }

        // A shell redirect creates the file before the program runs.
        if let Some(path) = &invocation.stdout_to {
            std::fs::File::create(path)?;
        }

        if let Some(failure) = self.failures.get(&invocation.tool) {
            if failure.on_call.is_none_or(|n| n == nth) {
                return Ok(ToolOutput::failed(failure.code, failure.stderr.clone()));
            }
        }

        if self.corrupt.contains(&invocation.tool) {
            if let Some(path) = corrupt_target(invocation) {
                std::fs::write(path, b"\x00garbage\x00")?;
            }
        } else if !self.silent.contains(&invocation.tool) {
            produce_output(invocation)?;
        }
        Ok(ToolOutput::succeeded())
    }
}

fn produce_output(invocation: &Invocation) -> io::Result<()> {
    let args = &invocation.args;
    match invocation.tool {
        ExternalTool::ScanImage => {
            let path = invocation
                .stdout_to
                .as_deref()
                .ok_or_else(|| io::Error::other("scanimage needs a stdout redirect"))?;
            write_tiff(path)
        }
        ExternalTool::Tesseract => {
            let base = PathBuf::from(&args[1]);
            write_pdf(
                &base.with_extension("pdf"),
                1,
                &format!("ocr:{}", file_name(&args[0])),
            )
        }
        ExternalTool::Convert => write_pdf(
            Path::new(&args[1]),
            1,
            &format!("convert:{}", file_name(&args[0])),
        ),
        ExternalTool::Ghostscript => {
            let output = args
                .iter()
                .find_map(|arg| arg.to_str()?.strip_prefix("-sOutputFile="))
                .ok_or_else(|| io::Error::other("gs needs -sOutputFile"))?;
            let inputs = args
                .iter()
                .filter(|arg| !arg.to_string_lossy().starts_with('-'))
                .count();
            write_pdf(Path::new(output), inputs, "merged")
        }
    }
}

/// File the tool would have produced.
fn corrupt_target(invocation: &Invocation) -> Option<PathBuf> {
    match invocation.tool {
        ExternalTool::ScanImage => invocation.stdout_to.clone(),
        ExternalTool::Tesseract => Some(PathBuf::from(&invocation.args[1]).with_extension("pdf")),
        ExternalTool::Convert => Some(PathBuf::from(&invocation.args[1])),
        ExternalTool::Ghostscript => invocation
            .args
            .iter()
            .find_map(|arg| arg.to_str()?.strip_prefix("-sOutputFile="))
            .map(PathBuf::from),
    }
}

fn file_name(arg: &OsString) -> String {
    Path::new(arg)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write a small white TIFF, as a flatbed scan would.
pub(crate) fn write_tiff(path: &Path) -> io::Result<()> {
    image::RgbImage::from_pixel(8, 8, image::Rgb([255, 255, 255]))
        .save_with_format(path, image::ImageFormat::Tiff)
        .map_err(io::Error::other)
}

/// Write a PDF with `pages` blank pages whose content streams carry `label`.
pub(crate) fn write_pdf(path: &Path, pages: usize, label: &str) -> io::Result<()> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages);
    for _ in 0..pages {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).map(|_| ()).map_err(io::Error::other)
}
