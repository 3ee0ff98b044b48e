//! Interactive question/answer engine for command-line wizards.
//!
//! Questions are asked inside nested contexts, validated, and remembered in a
//! JSON history file so a re-run can offer the previous answers as defaults.
//! The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (naming, context stack,
//!   validators, history model). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (terminal, presenters, history and
//!   config files). Isolated behind traits so tests can script the user.
//!
//! [`wizard`] and [`ask`] coordinate the two to implement the engine; the
//! `askwiz` binary exposes it to shell scripts.

pub mod ask;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wizard;

pub use crate::core::error::{ValidationError, WizardError};
pub use crate::core::options::ChoiceOptions;
pub use crate::wizard::{HistoryOptions, Question, Wizard};
