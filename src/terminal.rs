//! [`Dialogs`] over a line-oriented terminal.

use std::io::{BufRead, Write};

use crate::controller::Dialogs;

/// Prompts on `output` and reads answers from `input`, one line each.
///
/// End of input counts as cancelling a prompt and declining a confirmation.
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, text: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{text} ").and_then(|_| self.output.flush()) {
            tracing::warn!("failed to write prompt: {e}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("failed to read answer: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn request_text(&mut self, prompt: &str) -> Option<String> {
        self.ask(prompt)
    }

    fn confirm(&mut self, message: &str) -> bool {
        let question = format!("{message}\n[y/N]");
        self.ask(&question)
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Answers every confirmation with yes and never supplies text.
pub struct AssumeYes;

impl Dialogs for AssumeYes {
    fn request_text(&mut self, _prompt: &str) -> Option<String> {
        None
    }

    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}
