//! Stack of open context names and navigation from the root context.

use crate::core::error::WizardError;
use crate::store::Context;

/// Ordered names of the currently open contexts, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextStack {
    names: Vec<String>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Pop the innermost context.
    ///
    /// When `expected` is given it must match the innermost name; on mismatch
    /// the stack is left unchanged.
    pub fn pop(&mut self, expected: Option<&str>) -> Result<String, WizardError> {
        let open = self.names.last().map(String::as_str);
        let matches = match (expected, open) {
            (_, None) => false,
            (Some(expected), Some(open)) => expected == open,
            (None, Some(_)) => true,
        };
        if !matches {
            return Err(WizardError::ContextMismatch {
                expected: expected.map(str::to_string),
                open: open.map(str::to_string),
            });
        }
        self.names.pop().ok_or(WizardError::ContextMismatch {
            expected: None,
            open: None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `/`-separated path of open contexts; empty at the root.
    pub fn path(&self) -> String {
        self.names.join("/")
    }

    /// Walk from `root` through every open context.
    pub fn resolve<'a>(&self, root: &'a Context) -> Result<&'a Context, WizardError> {
        let mut current = root;
        for (depth, name) in self.names.iter().enumerate() {
            current = current
                .child(name)
                .ok_or_else(|| self.unresolved(depth))?;
        }
        Ok(current)
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Context) -> Result<&'a mut Context, WizardError> {
        let mut current = root;
        for (depth, name) in self.names.iter().enumerate() {
            current = current
                .child_mut(name)
                .ok_or_else(|| self.unresolved(depth))?;
        }
        Ok(current)
    }

    fn unresolved(&self, depth: usize) -> WizardError {
        WizardError::UnresolvedContext {
            path: self.names[..=depth].join("/"),
        }
    }
}
