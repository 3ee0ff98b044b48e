//! Presenters obtain the raw answer for a question.

use anyhow::Result;

use super::terminal::Terminal;

/// Source of raw user input for one question.
///
/// `None` means the user gave no answer.
pub trait Presenter {
    fn present(&mut self) -> Result<Option<String>>;
}

impl<F> Presenter for F
where
    F: FnMut() -> Option<String>,
{
    fn present(&mut self) -> Result<Option<String>> {
        Ok(self())
    }
}

/// Presenter for multiple-choice questions.
///
/// Every option is registered before the first call to `present`, which must
/// show them as a numbered menu.
pub trait OptionPresenter: Presenter {
    fn add_option(&mut self, code: &str, display: &str);
}

/// Default presenter reading from a [`Terminal`].
pub struct TerminalPresenter<'t> {
    terminal: &'t dyn Terminal,
    prompt: String,
    options: Vec<String>,
}

impl<'t> TerminalPresenter<'t> {
    pub fn new(terminal: &'t dyn Terminal, prompt: impl Into<String>) -> Self {
        Self {
            terminal,
            prompt: prompt.into(),
            options: Vec::new(),
        }
    }
}

impl Presenter for TerminalPresenter<'_> {
    fn present(&mut self) -> Result<Option<String>> {
        if !self.options.is_empty() {
            for line in option_menu(&self.options) {
                self.terminal.write_line(&line)?;
            }
        }
        self.terminal.read_line(&self.prompt).map(Some)
    }
}

impl OptionPresenter for TerminalPresenter<'_> {
    fn add_option(&mut self, _code: &str, display: &str) {
        self.options.push(display.to_string());
    }
}

/// Prompt shown by the default presenter: the question, a `[default]` hint
/// when there is one, and a trailing space before the input point.
pub fn question_prompt(question: &str, default: Option<&str>) -> String {
    let mut prompt = question.to_string();
    if let Some(default) = default {
        prompt.push_str(&format!(" [{default}]"));
    }
    if !prompt.ends_with(' ') {
        prompt.push(' ');
    }
    prompt
}

/// Numbered menu lines, with indices padded to the width of the largest.
fn option_menu(options: &[String]) -> Vec<String> {
    let width = options.len().to_string().len();
    let mut lines = Vec::with_capacity(options.len() + 1);
    lines.push("Options:".to_string());
    lines.extend(
        options
            .iter()
            .enumerate()
            .map(|(index, display)| format!("  [{:>width$}] {}", index + 1, display)),
    );
    lines
}
