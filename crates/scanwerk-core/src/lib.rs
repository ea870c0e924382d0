// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwerk — Core types, configuration, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod prompt;
pub mod types;

pub use config::{ColorMode, ConfigLayer, ScanConfig};
pub use error::{Result, ScanwerkError};
pub use prompt::{Prompter, ScriptedPrompter};
pub use types::*;
