//! Error kinds for the answer store and the ask loop.
//!
//! [`ValidationError`] is recovered inside the ask loop by re-prompting.
//! [`WizardError`] is fatal: it reaches the caller through `anyhow::Result`
//! and can be inspected with `downcast_ref::<WizardError>()`.

use thiserror::Error;

/// Rejection of a single user answer. Never surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No input and no usable default for a mandatory question.
    #[error("An answer is required")]
    AnswerRequired,
    /// A validator rejected the cleaned input.
    #[error("{0}")]
    Failed(String),
    /// The input matched neither an option's text nor its number.
    #[error("Not an option")]
    NotAnOption,
}

impl ValidationError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Fatal errors raised by the wizard engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A question or context name is already used in the current context.
    #[error("name '{name}' already used in context '{context}'")]
    DuplicateName { name: String, context: String },

    /// Caller-chosen names may not use the auto-name prefix.
    #[error("name '{name}' uses the reserved prefix '{prefix}'")]
    ReservedName { name: String, prefix: &'static str },

    /// Scope exit did not match scope entry.
    #[error("{}", mismatch_message(.expected.as_deref(), .open.as_deref()))]
    ContextMismatch {
        expected: Option<String>,
        open: Option<String>,
    },

    /// A name on the context stack no longer resolves to a context.
    #[error("context stack entry '{path}' does not resolve to a context")]
    UnresolvedContext { path: String },

    /// History node with a `type` other than `question` or `context`.
    #[error("unknown history node type '{type_code}' at '{path}'")]
    UnknownHistoryFormat { type_code: String, path: String },

    /// History node that is not shaped like a question or context.
    #[error("malformed history at '{path}': {reason}")]
    MalformedHistory { path: String, reason: String },

    /// Lookup of a name that has no explicitly named answer.
    #[error("no answer named '{name}'")]
    MissingAnswer { name: String },

    /// The input stream ended while a question was waiting for an answer.
    #[error("input closed while waiting for an answer")]
    InputClosed,
}

fn mismatch_message(expected: Option<&str>, open: Option<&str>) -> String {
    match (expected, open) {
        (Some(expected), Some(open)) => {
            format!("cannot close context '{expected}': current context is '{open}'")
        }
        (Some(expected), None) => {
            format!("cannot close context '{expected}': no context is open")
        }
        (None, _) => "cannot close context: no context is open".to_string(),
    }
}
