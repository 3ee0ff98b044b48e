//! Storage names for questions.
//!
//! Explicit names are used as-is. Questions without a name are stored under
//! `__auto__.<question text>`, suffixed `.1`, `.2`, ... when the same text was
//! already asked in the current context. Auto names only key the history file;
//! their answers are not retrievable.

use crate::core::error::WizardError;
use crate::store::Context;

/// Prefix reserved for generated question names.
pub const AUTO_PREFIX: &str = "__auto__.";

/// Storage name chosen for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub auto: bool,
}

/// Reject caller-chosen names that could collide with generated ones.
pub fn ensure_not_reserved(name: &str) -> Result<(), WizardError> {
    if name.starts_with(AUTO_PREFIX) {
        return Err(WizardError::ReservedName {
            name: name.to_string(),
            prefix: AUTO_PREFIX,
        });
    }
    Ok(())
}

/// Pick the storage name for a question asked in `context`.
///
/// `label` identifies `context` in error messages.
pub fn resolve_name(
    context: &Context,
    explicit: Option<&str>,
    question: &str,
    label: &str,
) -> Result<ResolvedName, WizardError> {
    match explicit {
        Some(name) => {
            ensure_not_reserved(name)?;
            if context.is_asked(name) || context.child(name).is_some_and(|child| child.opened) {
                return Err(WizardError::DuplicateName {
                    name: name.to_string(),
                    context: label.to_string(),
                });
            }
            Ok(ResolvedName {
                name: name.to_string(),
                auto: false,
            })
        }
        None => Ok(ResolvedName {
            name: unique_auto_name(context, question),
            auto: true,
        }),
    }
}

fn unique_auto_name(context: &Context, question: &str) -> String {
    let base = format!("{AUTO_PREFIX}{question}");
    let mut name = base.clone();
    let mut suffix = 0u32;
    while context.is_asked(&name) {
        suffix += 1;
        name = format!("{base}.{suffix}");
    }
    name
}
