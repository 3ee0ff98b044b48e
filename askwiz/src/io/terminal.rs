//! Line-oriented terminal used by the default presenters.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::core::error::WizardError;

/// Console boundary for prompts and user-facing messages.
///
/// Methods take `&self` so a presenter and the wizard's messages can share
/// one terminal during an ask.
pub trait Terminal {
    /// Show `prompt` and read one line of input without its line ending.
    ///
    /// Fails with [`WizardError::InputClosed`] when no more input exists.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Write one informational line.
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Terminal on stdin, with prompts and messages on stderr so that stdout
/// stays free for answers printed by scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTerminal;

impl Terminal for ConsoleTerminal {
    fn read_line(&self, prompt: &str) -> Result<String> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{prompt}").context("write prompt")?;
        stderr.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read answer from stdin")?;
        if read == 0 {
            return Err(WizardError::InputClosed.into());
        }
        Ok(strip_line_ending(line))
    }

    fn write_line(&self, line: &str) -> Result<()> {
        writeln!(io::stderr().lock(), "{line}").context("write message")
    }
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}
