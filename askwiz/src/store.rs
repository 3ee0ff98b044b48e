//! In-memory answer store: a tree of contexts holding question records.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::error::WizardError;

/// Answer state for a single question name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionRecord {
    /// Raw answer from history, or the raw input of this session's ask.
    pub prior_answer: Option<String>,
    /// Validated answer. Only set for explicitly named questions.
    pub answer: Option<Value>,
    /// True once the question has been asked in this session.
    pub asked: bool,
}

impl QuestionRecord {
    pub fn with_prior_answer(prior_answer: Option<String>) -> Self {
        Self {
            prior_answer,
            ..Self::default()
        }
    }
}

/// A slot in a context.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Question(QuestionRecord),
    Context(Context),
}

impl Entry {
    /// True if the entry was created or used by this session, as opposed to
    /// only being restored from history.
    pub fn is_live(&self) -> bool {
        match self {
            Entry::Question(record) => record.asked,
            Entry::Context(context) => context.opened,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Question(_) => "question",
            Entry::Context(_) => "context",
        }
    }
}

/// Named namespace of questions and child contexts.
///
/// Entries are keyed by name in sorted order so the persisted form is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    pub entries: BTreeMap<String, Entry>,
    /// Set when the context is entered in this session. Not persisted.
    pub opened: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn record(&self, name: &str) -> Option<&QuestionRecord> {
        match self.entries.get(name) {
            Some(Entry::Question(record)) => Some(record),
            _ => None,
        }
    }

    pub fn record_mut(&mut self, name: &str) -> Option<&mut QuestionRecord> {
        match self.entries.get_mut(name) {
            Some(Entry::Question(record)) => Some(record),
            _ => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Context> {
        match self.entries.get(name) {
            Some(Entry::Context(context)) => Some(context),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Context> {
        match self.entries.get_mut(name) {
            Some(Entry::Context(context)) => Some(context),
            _ => None,
        }
    }

    /// True if `name` holds a record that was already asked this session.
    pub fn is_asked(&self, name: &str) -> bool {
        self.record(name).is_some_and(|record| record.asked)
    }

    /// Return the record for `name`, creating an empty one if needed.
    ///
    /// A history-only context under the same name is replaced. Live contexts
    /// are never replaced; `label` names the current context in the error.
    pub fn record_entry(
        &mut self,
        name: &str,
        label: &str,
    ) -> Result<&mut QuestionRecord, WizardError> {
        let existing_context = match self.entries.get(name) {
            Some(Entry::Context(context)) => Some(context.opened),
            _ => None,
        };
        match existing_context {
            Some(true) => {
                return Err(WizardError::DuplicateName {
                    name: name.to_string(),
                    context: label.to_string(),
                });
            }
            Some(false) => {
                tracing::debug!(name, "replacing history-only context with a question");
                self.entries.remove(name);
            }
            None => {}
        }
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Entry::Question(QuestionRecord::default()));
        match entry {
            Entry::Question(record) => Ok(record),
            Entry::Context(_) => Err(WizardError::DuplicateName {
                name: name.to_string(),
                context: label.to_string(),
            }),
        }
    }

    /// Open the child context `name`, creating it if needed.
    ///
    /// Fails if the name is taken by an asked question or a context already
    /// opened this session. A context restored from history is reused and a
    /// history-only question is replaced.
    pub fn open_child(&mut self, name: &str, label: &str) -> Result<&mut Context, WizardError> {
        let existing = self
            .entries
            .get(name)
            .map(|entry| (entry.is_live(), matches!(entry, Entry::Question(_))));
        match existing {
            Some((true, _)) => {
                return Err(WizardError::DuplicateName {
                    name: name.to_string(),
                    context: label.to_string(),
                });
            }
            Some((false, true)) => {
                self.entries.remove(name);
            }
            _ => {}
        }
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Entry::Context(Context::new()));
        match entry {
            Entry::Context(context) => {
                context.opened = true;
                Ok(context)
            }
            Entry::Question(_) => Err(WizardError::DuplicateName {
                name: name.to_string(),
                context: label.to_string(),
            }),
        }
    }

    /// Validated answer of an explicitly named, asked question.
    pub fn answer(&self, name: &str) -> Option<&Value> {
        self.record(name).and_then(|record| record.answer.as_ref())
    }
}
