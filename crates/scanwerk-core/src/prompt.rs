// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator interaction — the blocking questions the pipeline asks.

use std::collections::VecDeque;
use std::num::NonZeroU32;

use crate::error::{Result, ScanwerkError};

/// Source of operator answers.
///
/// The binary reads lines from the terminal; tests and unattended callers
/// supply answers up front with [`ScriptedPrompter`].
pub trait Prompter {
    /// Show `message` and block until the operator answers with one line.
    ///
    /// The returned line has its trailing newline removed. End of input is
    /// reported as [`ScanwerkError::PromptClosed`].
    fn ask(&mut self, message: &str) -> Result<String>;

    /// Report progress that needs no answer.
    fn tell(&mut self, message: &str);
}

/// Ask for the number of pages until the operator gives a positive integer.
pub fn ask_page_count(prompter: &mut dyn Prompter) -> Result<NonZeroU32> {
    loop {
        let answer = prompter.ask("Pages: ")?;
        match answer.trim().parse::<NonZeroU32>() {
            Ok(pages) => return Ok(pages),
            Err(_) => prompter.tell(&format!(
                "Error: '{}' is not a valid positive integer.",
                answer.trim()
            )),
        }
    }
}

/// Block until the operator confirms that page `number` (1-based) is on the
/// scanner glass.
pub fn confirm_page(prompter: &mut dyn Prompter, number: usize) -> Result<()> {
    prompter
        .ask(&format!("Press Enter to scan page {number}"))
        .map(|_| ())
}

/// Prompter answering from a fixed list of lines.
///
/// Running out of answers behaves like a closed terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    told: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            told: Vec::new(),
        }
    }

    /// Every question asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Every progress message shown so far, in order.
    pub fn told(&self) -> &[String] {
        &self.told
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str) -> Result<String> {
        self.asked.push(message.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| ScanwerkError::PromptClosed(message.trim().to_owned()))
    }

    fn tell(&mut self, message: &str) {
        self.told.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_reprompts_on_invalid_answers() {
        let mut prompter = ScriptedPrompter::new(["zero", "0", "-2", " 3 "]);
        let pages = ask_page_count(&mut prompter).expect("valid answer");
        assert_eq!(pages.get(), 3);
        assert_eq!(prompter.asked().len(), 4);
        assert_eq!(prompter.told().len(), 3);
    }

    #[test]
    fn page_count_fails_when_input_closes() {
        let mut prompter = ScriptedPrompter::new(["nope"]);
        let err = ask_page_count(&mut prompter).unwrap_err();
        assert!(matches!(err, ScanwerkError::PromptClosed(_)));
    }

    #[test]
    fn confirmation_names_one_based_page() {
        let mut prompter = ScriptedPrompter::new([""]);
        confirm_page(&mut prompter, 1).expect("confirmed");
        assert_eq!(prompter.asked(), ["Press Enter to scan page 1"]);
    }
}
