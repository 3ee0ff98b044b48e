//! Test-only doubles for the terminal and presenters.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Result, anyhow};

use crate::core::error::WizardError;
use crate::io::presenter::{OptionPresenter, Presenter};
use crate::io::terminal::Terminal;

#[derive(Debug, Default)]
struct TerminalScript {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    lines: Vec<String>,
}

/// Terminal that replays scripted answers and records everything shown.
///
/// Clones share the same script, so a test can keep one handle after moving
/// another into a [`crate::wizard::Wizard`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    script: Rc<RefCell<TerminalScript>>,
}

impl ScriptedTerminal {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        let terminal = Self::default();
        for answer in answers {
            terminal.push_answer(answer);
        }
        terminal
    }

    pub fn push_answer(&self, answer: impl Into<String>) {
        self.script.borrow_mut().answers.push_back(answer.into());
    }

    /// Prompts passed to `read_line`, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.script.borrow().prompts.clone()
    }

    /// Lines written with `write_line`, in order.
    pub fn lines(&self) -> Vec<String> {
        self.script.borrow().lines.clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().answers.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&self, prompt: &str) -> Result<String> {
        let mut script = self.script.borrow_mut();
        script.prompts.push(prompt.to_string());
        script
            .answers
            .pop_front()
            .ok_or_else(|| WizardError::InputClosed.into())
    }

    fn write_line(&self, line: &str) -> Result<()> {
        self.script.borrow_mut().lines.push(line.to_string());
        Ok(())
    }
}

/// Presenter that replays scripted answers and records registered options.
///
/// Running out of answers is an error so a test can never spin forever on a
/// required question.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<Option<String>>,
    pub options: Vec<(String, String)>,
    pub presented: usize,
}

impl ScriptedPresenter {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            ..Self::default()
        }
    }

    /// Presenter whose only response is "no input".
    pub fn silent() -> Self {
        Self {
            answers: VecDeque::from([None]),
            ..Self::default()
        }
    }
}

impl Presenter for ScriptedPresenter {
    fn present(&mut self) -> Result<Option<String>> {
        self.presented += 1;
        let answered = self.presented - 1;
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("scripted presenter exhausted after {answered} answers"))
    }
}

impl OptionPresenter for ScriptedPresenter {
    fn add_option(&mut self, code: &str, display: &str) {
        self.options.push((code.to_string(), display.to_string()));
    }
}

/// Temporary directory holding a history file path.
pub struct TempHistory {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TempHistory {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("answers.json");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
