//! Standard-input port used by the hold loop.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use figkeep_common::error::Result;

use crate::trigger::{self, KeyTrigger};

/// The console facilities a hold needs.
///
/// [`Stdio`] is the real implementation; tests provide scripted ones.
pub trait Console {
    /// Whether standard input is an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// Writes the prompt line. Failures are ignored.
    fn print_prompt(&self, text: &str);

    /// Source for the Enter trigger's blocking line read.
    fn line_source(&self) -> Box<dyn BufRead + Send>;

    /// Opens the single-key trigger, if this console supports one.
    ///
    /// # Errors
    ///
    /// Returns [`Unsupported`](figkeep_common::error::FigkeepError::Unsupported)
    /// when single-key input is unavailable.
    fn any_key(&self) -> Result<Box<dyn KeyTrigger>>;
}

/// The process's real standard input and output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdio;

impl Console for Stdio {
    fn is_interactive(&self) -> bool {
        is_interactive()
    }

    fn print_prompt(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    fn line_source(&self) -> Box<dyn BufRead + Send> {
        Box::new(BufReader::new(io::stdin()))
    }

    fn any_key(&self) -> Result<Box<dyn KeyTrigger>> {
        trigger::any_key()
    }
}

/// Returns `true` when standard input is an interactive terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}
