// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Running external programs and turning their exit status into errors.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::StepLocation;
use tracing::{debug, warn};

use super::ExternalTool;

/// One external program call: the tool, its arguments, and optionally a file
/// that receives its standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: ExternalTool,
    pub args: Vec<OsString>,
    pub stdout_to: Option<PathBuf>,
}

impl Invocation {
    pub fn new(tool: ExternalTool) -> Self {
        Self {
            tool,
            args: Vec::new(),
            stdout_to: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Redirect the program's standard output into `path`.
    pub fn stdout_to(mut self, path: impl AsRef<Path>) -> Self {
        self.stdout_to = Some(path.as_ref().to_path_buf());
        self
    }

    /// Shell-like rendering for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.tool.program().to_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        if let Some(path) = &self.stdout_to {
            line.push_str(" > ");
            line.push_str(&path.display().to_string());
        }
        line
    }
}

/// What a finished program reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the program was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    /// Everything the program wrote to standard error.
    pub stderr: String,
}

impl ToolOutput {
    pub fn succeeded() -> Self {
        Self {
            code: Some(0),
            success: true,
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stderr: stderr.into(),
        }
    }

    fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exited with code {code}"),
            None => "was terminated by a signal".to_owned(),
        }
    }
}

/// Executes invocations. The pipeline only talks to programs through this
/// trait.
pub trait CommandRunner {
    /// Run to completion. `Err` means the program could not be started at
    /// all; a non-zero exit is reported through [`ToolOutput::success`].
    fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutput>;
}

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutput> {
        let mut command = Command::new(invocation.tool.program());
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped());

        match &invocation.stdout_to {
            Some(path) => {
                command.stdout(Stdio::from(File::create(path)?));
            }
            None => {
                command.stdout(Stdio::piped());
            }
        }

        let output = command.output()?;
        if !output.stdout.is_empty() {
            debug!(
                tool = invocation.tool.program(),
                stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
                "tool output"
            );
        }

        Ok(ToolOutput {
            code: output.status.code(),
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `invocation` for the pipeline step `at`, failing unless the program
/// started and exited successfully.
pub fn run_step(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
    at: StepLocation,
) -> Result<ToolOutput> {
    debug!(%at, command = %invocation.command_line(), "running");

    let output = runner
        .run(invocation)
        .map_err(|source| ScanwerkError::Launch {
            at,
            program: invocation.tool.program().to_owned(),
            source,
        })?;

    if output.success {
        return Ok(output);
    }

    warn!(%at, code = ?output.code, "{} failed", invocation.tool.program());
    Err(ScanwerkError::ToolFailed {
        at,
        program: invocation.tool.program().to_owned(),
        status: output.status_text(),
        stderr: output.stderr,
    })
}

/// Fail with [`ScanwerkError::MissingArtifact`] unless `path` is a non-empty
/// file.
pub fn expect_artifact(path: &Path, at: StepLocation) -> Result<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(meta.len()),
        _ => Err(ScanwerkError::MissingArtifact {
            at,
            path: path.to_path_buf(),
        }),
    }
}
