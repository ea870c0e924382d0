// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwerk — scan paper pages into one searchable PDF
//
// Entry point. Initialises logging and interrupt cleanup, checks the external
// programs, resolves the configuration, and runs the pipeline.

mod cli;
mod prompt;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use scanwerk_core::config;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::human_errors::humanize_error;
use scanwerk_document::workspace::SCRATCH;
use scanwerk_document::{Outcome, PathLocator, Pipeline, SystemRunner, preflight};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use cli::Args;
use prompt::TerminalPrompter;

/// Exit status for a run that ended without failing, including one that
/// found its output already present.
const SUCCESS: u8 = 0;
/// Exit status for missing tools and every failed run.
const FAILURE: u8 = 1;
/// Exit status after SIGINT/SIGTERM.
const INTERRUPTED: u8 = 130;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn main() -> ExitCode {
    let filter = init_logging();

    if let Err(err) = ctrlc::set_handler(|| {
        SCRATCH.remove_all();
        std::process::exit(i32::from(INTERRUPTED));
    }) {
        tracing::warn!(error = %err, "could not install the interrupt handler");
    }

    if let Err(err) = preflight(&PathLocator) {
        return ExitCode::from(finish(Err(err), false, &mut io::stdout()));
    }

    let args = Args::parse();
    if args.verbose {
        if let Err(err) = filter.modify(|current| *current = EnvFilter::new("debug")) {
            tracing::warn!(error = %err, "could not raise the log level");
        }
    }

    ExitCode::from(finish(run(&args), args.json, &mut io::stdout()))
}

fn run(args: &Args) -> Result<Outcome> {
    let mut prompter = TerminalPrompter::stdio();

    let config = config::resolve(&args.filename, args.to_layer(), &mut prompter)?;
    tracing::debug!(?config, "configuration resolved");

    let runner = SystemRunner;
    Pipeline::new(&runner, &mut prompter).run(&config)
}

/// Log how the run ended, print the JSON report when asked, and pick the
/// exit status.
fn finish(result: Result<Outcome>, json: bool, out: &mut dyn Write) -> u8 {
    match result {
        Ok(Outcome::Published(run_report)) if json => {
            let printed = serde_json::to_string_pretty(&run_report)
                .map_err(ScanwerkError::from)
                .and_then(|text| writeln!(out, "{text}").map_err(ScanwerkError::from));
            match printed {
                Ok(()) => SUCCESS,
                Err(err) => {
                    report(&err);
                    FAILURE
                }
            }
        }
        Ok(Outcome::Published(_)) => SUCCESS,
        // The pipeline has already logged the existing file.
        Ok(Outcome::OutputExists(_)) => SUCCESS,
        // Something appeared at the output path while the pages were scanned.
        Err(ScanwerkError::OutputExists(path)) => {
            tracing::error!("Output pdf {} already exists", path.display());
            SUCCESS
        }
        Err(err) => {
            report(&err);
            FAILURE
        }
    }
}

/// Log to stderr so stdout stays free for prompts and `--json`.
///
/// `RUST_LOG` wins when set; otherwise `info`. The handle lets `--verbose`
/// raise the level once the arguments have been parsed.
fn init_logging() -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    handle
}

/// Log `err` with its plain-English explanation.
fn report(err: &ScanwerkError) {
    let human = humanize_error(err);
    tracing::error!("{err}");
    tracing::error!("{}", human.message);
    tracing::info!("{}", human.suggestion);
}
