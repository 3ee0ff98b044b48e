//! The wizard engine: asks questions inside nested contexts and keeps their
//! answers in a persisted history.
//!
//! ```no_run
//! use askwiz::wizard::{Question, Wizard};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut wiz = Wizard::new();
//! wiz.ask(Question::new("Project name?").name("project"))?;
//! for person in ["alice", "bob"] {
//!     wiz.in_context(person, |wiz| {
//!         wiz.ask(Question::new("Email?").name("email"))?;
//!         Ok(())
//!     })?;
//! }
//! let email = wiz.answers().lookup(&["alice", "email"])?;
//! # Ok(())
//! # }
//! ```

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ask::{AskOutcome, ask_until_valid};
use crate::core::error::WizardError;
use crate::core::history::HistoryDocument;
use crate::core::naming::{ensure_not_reserved, resolve_name};
use crate::core::options::ChoiceOptions;
use crate::core::stack::ContextStack;
use crate::core::validate::{OptionValidator, Validator, YesNoValidator};
use crate::io::config::WizardConfig;
use crate::io::history_store::{load_history, write_history};
use crate::io::presenter::{OptionPresenter, Presenter, TerminalPresenter, question_prompt};
use crate::io::terminal::{ConsoleTerminal, Terminal};
use crate::store::Context;

enum PresenterRef<'a> {
    Plain(&'a mut dyn Presenter),
    Options(&'a mut dyn OptionPresenter),
}

/// A question to ask, built with chained setters.
pub struct Question<'a> {
    text: String,
    default: Option<String>,
    required: bool,
    name: Option<String>,
    presenter: Option<PresenterRef<'a>>,
    validators: Vec<Box<dyn Validator + 'a>>,
}

impl<'a> Question<'a> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default: None,
            required: true,
            name: None,
            presenter: None,
            validators: Vec::new(),
        }
    }

    /// Raw answer used when the user enters nothing. A prior answer from
    /// history takes precedence.
    pub fn default_answer(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Default for [`Wizard::ask_yes_no`], stored as `yes` or `no`.
    pub fn yes_no_default(self, default: bool) -> Self {
        self.default_answer(if default { "yes" } else { "no" })
    }

    /// Accept an empty answer.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Store the answer under `name` and make it retrievable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn presenter(mut self, presenter: &'a mut dyn Presenter) -> Self {
        self.presenter = Some(PresenterRef::Plain(presenter));
        self
    }

    /// Presenter that also receives the options of a choice question.
    pub fn option_presenter(mut self, presenter: &'a mut dyn OptionPresenter) -> Self {
        self.presenter = Some(PresenterRef::Options(presenter));
        self
    }

    /// Append a validator; validators run in the order they were added.
    pub fn validator(mut self, validator: impl Validator + 'a) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What to do when the history file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Load prior answers without asking.
    pub load_if_exists: bool,
    /// Ask the user whether to load prior answers.
    pub prompt_if_exists: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            load_if_exists: false,
            prompt_if_exists: true,
        }
    }
}

/// One interactive session.
///
/// Owns the root answer context and the stack of open contexts.
pub struct Wizard {
    root: Context,
    stack: ContextStack,
    history_path: Option<PathBuf>,
    terminal: Box<dyn Terminal>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Wizard reading from stdin.
    pub fn new() -> Self {
        Self::with_terminal(ConsoleTerminal)
    }

    pub fn with_terminal(terminal: impl Terminal + 'static) -> Self {
        Self {
            root: Context::new(),
            stack: ContextStack::new(),
            history_path: None,
            terminal: Box::new(terminal),
        }
    }

    /// Console wizard with the history settings from `config`.
    pub fn from_config(config: &WizardConfig) -> Result<Self> {
        let mut wizard = Self::new();
        wizard.apply_config(config)?;
        Ok(wizard)
    }

    pub fn apply_config(&mut self, config: &WizardConfig) -> Result<()> {
        config.validate()?;
        if let Some(path) = &config.history.path {
            self.set_history_path(path.clone(), config.history.options())?;
        }
        Ok(())
    }

    pub fn history_path(&self) -> Option<&Path> {
        self.history_path.as_deref()
    }

    /// Persist answers to `path` after every question.
    ///
    /// When the file exists, prior answers are loaded, offered with a yes/no
    /// question, or ignored according to `options`.
    pub fn set_history_path(
        &mut self,
        path: impl Into<PathBuf>,
        options: HistoryOptions,
    ) -> Result<()> {
        let path = path.into();
        if path.exists() {
            if options.load_if_exists {
                self.load_history(&path)?;
            } else if options.prompt_if_exists {
                let question = format!("Load prior answers from {}?", path.display());
                if self.confirm(&question)? {
                    self.load_history(&path)?;
                }
            }
        }
        debug!(path = %path.display(), "history path set");
        self.history_path = Some(path);
        Ok(())
    }

    /// Merge prior answers from a history file.
    pub fn load_history(&mut self, path: &Path) -> Result<()> {
        let document = load_history(path)?;
        document.merge_into(&mut self.root);
        debug!(path = %path.display(), "history merged");
        Ok(())
    }

    /// Write the history to the configured path, if any.
    pub fn save(&self) -> Result<()> {
        match &self.history_path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        write_history(path, &self.history())
    }

    /// Snapshot of the raw answers in durable form.
    pub fn history(&self) -> HistoryDocument {
        HistoryDocument::from_context(&self.root)
    }

    /// Ask a free-text question and return the validated answer.
    ///
    /// Without validators the answer is a JSON string; an optional question
    /// left blank yields `null`.
    pub fn ask(&mut self, question: Question<'_>) -> Result<Value> {
        self.run_question(question, None, None)
    }

    /// Ask a yes/no question.
    ///
    /// A default makes the question optional; an optional question left blank
    /// without a default is `false`.
    pub fn ask_yes_no(&mut self, mut question: Question<'_>) -> Result<bool> {
        if question.default.is_some() {
            question.required = false;
        }
        let value = self.run_question(question, None, Some(Box::new(YesNoValidator)))?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Ask the user to pick one of `options` and return its code.
    ///
    /// The default is given as an option code. An optional question left
    /// blank returns `None`.
    pub fn ask_choice(
        &mut self,
        mut question: Question<'_>,
        options: &ChoiceOptions,
    ) -> Result<Option<String>> {
        if options.is_empty() {
            bail!("choice question '{}' has no options", question.text);
        }
        if let Some(code) = question.default.take() {
            let display = options.display_for(&code).map(str::to_string);
            question.default = Some(display.unwrap_or(code));
        }
        let validator = Box::new(OptionValidator::new(options));
        let value = self.run_question(question, Some(options), Some(validator))?;
        Ok(match value {
            Value::String(code) => Some(code),
            _ => None,
        })
    }

    fn run_question(
        &mut self,
        question: Question<'_>,
        options: Option<&ChoiceOptions>,
        kind_validator: Option<Box<dyn Validator>>,
    ) -> Result<Value> {
        let Question {
            text,
            default,
            required,
            name,
            presenter,
            mut validators,
        } = question;
        if let Some(validator) = kind_validator {
            validators.push(validator);
        }

        let label = self.stack.path();
        let context = self.stack.resolve(&self.root)?;
        let resolved = resolve_name(context, name.as_deref(), &text, &label)?;
        // The store is only touched by `commit`, so a failed ask leaves it as loaded.
        let default = context
            .record(&resolved.name)
            .and_then(|record| record.prior_answer.clone())
            .or(default);
        debug!(name = %resolved.name, context = %label, auto = resolved.auto, "asking");

        let terminal = self.terminal.as_ref();
        let inform = |message: &str| terminal.write_line(message);
        let outcome = match presenter {
            Some(PresenterRef::Plain(presenter)) => {
                ask_until_valid(presenter, default.as_deref(), required, &validators, inform)?
            }
            Some(PresenterRef::Options(presenter)) => {
                register_options(presenter, options);
                ask_until_valid(presenter, default.as_deref(), required, &validators, inform)?
            }
            None => {
                let prompt = question_prompt(&text, default.as_deref());
                let mut presenter = TerminalPresenter::new(terminal, prompt);
                register_options(&mut presenter, options);
                ask_until_valid(&mut presenter, default.as_deref(), required, &validators, inform)?
            }
        };

        self.commit(&resolved.name, resolved.auto, &outcome)?;
        self.save()?;
        Ok(outcome.value)
    }

    fn commit(&mut self, name: &str, auto: bool, outcome: &AskOutcome) -> Result<()> {
        let context = self.stack.resolve_mut(&mut self.root)?;
        let record = context.record_entry(name, &self.stack.path())?;
        record.prior_answer = outcome.raw.clone();
        if !auto {
            record.answer = Some(outcome.value.clone());
        }
        record.asked = true;
        debug!(name, context = %self.stack.path(), "answer committed");
        Ok(())
    }

    /// Yes/no question that is not recorded in the history.
    fn confirm(&self, question: &str) -> Result<bool> {
        let terminal = self.terminal.as_ref();
        let mut presenter = TerminalPresenter::new(terminal, question_prompt(question, None));
        let validators: Vec<Box<dyn Validator>> = vec![Box::new(YesNoValidator)];
        let outcome = ask_until_valid(&mut presenter, None, true, &validators, |message| {
            terminal.write_line(message)
        })?;
        Ok(outcome.value.as_bool().unwrap_or(false))
    }

    /// Open a nested context; questions asked until the matching
    /// [`Wizard::exit_context`] are stored inside it.
    pub fn enter_context(&mut self, name: &str) -> Result<()> {
        ensure_not_reserved(name)?;
        let label = self.stack.path();
        let current = self.stack.resolve_mut(&mut self.root)?;
        current.open_child(name, &label)?;
        self.stack.push(name);
        debug!(context = %self.stack.path(), "context entered");
        Ok(())
    }

    /// Close the innermost context, checking its name when `expected` is given.
    pub fn exit_context(&mut self, expected: Option<&str>) -> Result<()> {
        let name = self.stack.pop(expected)?;
        debug!(context = %name, "context exited");
        Ok(())
    }

    /// Enter `name` and return a guard that exits it when dropped.
    pub fn context(&mut self, name: &str) -> Result<ContextGuard<'_>> {
        self.enter_context(name)?;
        Ok(ContextGuard {
            wizard: self,
            name: name.to_string(),
        })
    }

    /// Run `f` inside the context `name`, exiting it on every path.
    pub fn in_context<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.enter_context(name)?;
        let result = f(self);
        let exited = self.exit_context(Some(name));
        let value = result?;
        exited?;
        Ok(value)
    }

    /// Names of the open contexts, outermost first.
    pub fn open_contexts(&self) -> &[String] {
        self.stack.names()
    }

    /// Validated answer of an explicitly named question in the root context.
    pub fn get(&self, name: &str) -> Result<&Value, WizardError> {
        self.answers().get(name)
    }

    /// Read-only view of the answers, starting at the root context.
    pub fn answers(&self) -> Answers<'_> {
        Answers {
            context: &self.root,
            path: String::new(),
        }
    }
}

fn register_options<P>(presenter: &mut P, options: Option<&ChoiceOptions>)
where
    P: OptionPresenter + ?Sized,
{
    if let Some(options) = options {
        for (code, display) in options.iter() {
            presenter.add_option(code, display);
        }
    }
}

/// Scope guard returned by [`Wizard::context`].
pub struct ContextGuard<'w> {
    wizard: &'w mut Wizard,
    name: String,
}

impl Deref for ContextGuard<'_> {
    type Target = Wizard;

    fn deref(&self) -> &Wizard {
        &*self.wizard
    }
}

impl DerefMut for ContextGuard<'_> {
    fn deref_mut(&mut self) -> &mut Wizard {
        &mut *self.wizard
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.wizard.exit_context(Some(&self.name)) {
            warn!(context = %self.name, error = %err, "failed to exit context");
        }
    }
}

/// Answers stored in one context.
#[derive(Debug, Clone)]
pub struct Answers<'w> {
    context: &'w Context,
    path: String,
}

impl<'w> Answers<'w> {
    /// Validated answer of the explicitly named question `name`.
    pub fn get(&self, name: &str) -> Result<&'w Value, WizardError> {
        self.context
            .answer(name)
            .ok_or_else(|| WizardError::MissingAnswer {
                name: self.qualified(name),
            })
    }

    /// Answers of the nested context `name`.
    pub fn context(&self, name: &str) -> Result<Answers<'w>, WizardError> {
        let context = self
            .context
            .child(name)
            .ok_or_else(|| WizardError::MissingAnswer {
                name: self.qualified(name),
            })?;
        Ok(Answers {
            context,
            path: self.qualified(name),
        })
    }

    /// Answer at `path`: context names followed by a question name.
    pub fn lookup(&self, path: &[&str]) -> Result<&'w Value, WizardError> {
        let Some((name, contexts)) = path.split_last() else {
            return Err(WizardError::MissingAnswer {
                name: self.path.clone(),
            });
        };
        let mut answers = self.clone();
        for context in contexts {
            answers = answers.context(context)?;
        }
        answers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.context.answer(name).is_some()
    }

    fn qualified(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        }
    }
}
