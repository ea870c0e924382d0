// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preflight — make sure every external program is installed before the
// operator is asked anything.

use std::path::PathBuf;

use scanwerk_core::error::{Result, ScanwerkError};
use tracing::{debug, error};

use super::ExternalTool;

/// Resolves program names to executables.
pub trait ToolLocator {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up on the process `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Tools from [`ExternalTool::REQUIRED`] the locator cannot find, in check
/// order.
pub fn missing_tools(locator: &dyn ToolLocator) -> Vec<ExternalTool> {
    ExternalTool::REQUIRED
        .into_iter()
        .filter(|tool| match locator.locate(tool.program()) {
            Some(path) => {
                debug!(tool = tool.program(), path = %path.display(), "found");
                false
            }
            None => true,
        })
        .collect()
}

/// Fail with [`ScanwerkError::MissingTools`] when any required tool is absent,
/// logging one error line per missing program.
pub fn preflight(locator: &dyn ToolLocator) -> Result<()> {
    let missing = missing_tools(locator);
    if missing.is_empty() {
        return Ok(());
    }

    for tool in &missing {
        error!("{}", tool.missing_message());
    }
    Err(ScanwerkError::MissingTools(
        missing.iter().map(|tool| tool.program().to_owned()).collect(),
    ))
}
