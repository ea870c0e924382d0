// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture — one `scanimage` run per page, each written to its own TIFF.

use scanwerk_core::config::ScanConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::prompt::{self, Prompter};
use scanwerk_core::types::{PageArtifact, Stage, StepLocation};
use tracing::{debug, info, instrument};

use crate::tools::ExternalTool;
use crate::tools::runner::{self, CommandRunner, Invocation};
use crate::workspace::Workspace;

/// `scanimage` call that writes the raster for `artifact` to its stdout file.
///
/// Without a configured device the `-d` flag is left out so SANE picks its
/// default device.
pub fn scan_invocation(config: &ScanConfig, artifact: &PageArtifact) -> Invocation {
    let mut invocation = Invocation::new(ExternalTool::ScanImage);
    if let Some(device) = &config.device {
        invocation = invocation.args(["-d", device.as_str()]);
    }
    invocation
        .arg("--resolution")
        .arg(config.resolution.to_string())
        .arg("--brightness")
        .arg(config.brightness.to_string())
        .arg("--contrast")
        .arg(config.contrast.to_string())
        .arg("--mode")
        .arg(config.mode.as_str())
        .args(["--format", "tiff"])
        .stdout_to(&artifact.raster)
}

/// Scan one page and check the driver left a readable raster behind.
#[instrument(skip_all, fields(page = artifact.number()))]
pub fn capture_page(
    runner: &dyn CommandRunner,
    config: &ScanConfig,
    artifact: &PageArtifact,
) -> Result<()> {
    let at = StepLocation::page(Stage::Scan, artifact.index);

    runner::run_step(runner, &scan_invocation(config, artifact), at)?;
    let bytes = runner::expect_artifact(&artifact.raster, at)?;

    let (width, height) = image::image_dimensions(&artifact.raster).map_err(|err| {
        ScanwerkError::ImageError(format!(
            "{at}: {} is not a readable TIFF: {err}",
            artifact.raster.display()
        ))
    })?;

    debug!(bytes, width, height, "raster captured");
    Ok(())
}

/// Prompt for and scan every page in order, returning the artifacts in page
/// order.
pub fn capture_pages(
    runner: &dyn CommandRunner,
    prompter: &mut dyn Prompter,
    config: &ScanConfig,
    workspace: &Workspace,
) -> Result<Vec<PageArtifact>> {
    let pages = config.pages.get() as usize;
    let mut artifacts = Vec::with_capacity(pages);

    for index in 0..pages {
        let artifact = workspace.artifact(index);
        prompt::confirm_page(prompter, artifact.number())?;
        capture_page(runner, config, &artifact)?;
        prompter.tell("\tDone!");
        artifacts.push(artifact);
    }

    info!(pages, "all pages captured");
    Ok(artifacts)
}
