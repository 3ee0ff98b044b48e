//! I/O helpers: terminal, presenters, history files and configuration.

pub mod config;
pub mod history_store;
pub mod presenter;
pub mod terminal;
