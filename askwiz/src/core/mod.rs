//! Deterministic, pure logic behind the wizard.
//!
//! Core modules must be free of I/O side effects. They operate on the
//! in-memory answer store and return deterministic outputs suitable for tests.

pub mod error;
pub mod history;
pub mod naming;
pub mod options;
pub mod stack;
pub mod validate;
