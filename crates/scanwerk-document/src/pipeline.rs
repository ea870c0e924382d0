// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The capture-and-assemble pipeline.
//
// Output guard → workspace → capture → convert → assemble → publish. Every
// stage aborts the run on the first failure; the workspace is dropped on the
// way out either way, so nothing but the published PDF survives a run.

use std::path::PathBuf;

use chrono::Utc;
use scanwerk_core::config::ScanConfig;
use scanwerk_core::error::Result;
use scanwerk_core::prompt::Prompter;
use scanwerk_core::types::{RunId, RunReport};
use tracing::{error, info, info_span};

use crate::pdf::compose;
use crate::publish;
use crate::scan::{self, ConversionMode};
use crate::tools::runner::CommandRunner;
use crate::workspace::Workspace;

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output file was already there; nothing was scanned.
    OutputExists(PathBuf),
    /// The document was written to its final path.
    Published(RunReport),
}

/// One pipeline bound to its program runner and operator prompter.
pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    temp_root: Option<PathBuf>,
}

impl<'a> Pipeline<'a> {
    pub fn new(runner: &'a dyn CommandRunner, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            runner,
            prompter,
            temp_root: None,
        }
    }

    /// Create workspaces under `dir` instead of the system temporary
    /// directory.
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    /// Scan, convert, assemble, and publish one document.
    pub fn run(&mut self, config: &ScanConfig) -> Result<Outcome> {
        let run_id = RunId::new();
        let started_at = Utc::now();
        let span = info_span!("run", %run_id);
        let _enter = span.enter();

        let final_output = config.final_output();
        if final_output.exists() {
            error!("Output pdf {} already exists", final_output.display());
            return Ok(Outcome::OutputExists(final_output));
        }

        info!(
            pages = config.pages.get(),
            ocr = config.ocr_enabled(),
            output = %final_output.display(),
            "starting scan"
        );

        let workspace = match &self.temp_root {
            Some(dir) => Workspace::create_in(dir)?,
            None => Workspace::create()?,
        };

        let artifacts = scan::capture_pages(self.runner, self.prompter, config, &workspace)?;
        let pdfs = scan::convert_pages(self.runner, ConversionMode::for_config(config), &artifacts)?;
        let assembled = compose::assemble(self.runner, &pdfs, workspace.path())?;
        let published = publish::publish(assembled.path(), &final_output)?;

        info!(output = %published.path.display(), "scan complete");
        Ok(Outcome::Published(RunReport {
            run_id,
            started_at,
            pages: config.pages.get(),
            ocr: config.ocr_enabled(),
            merged: assembled.merged(),
            output: published.path,
            bytes: published.bytes,
            sha256: published.sha256,
        }))
    }
}
