//! Wizard configuration stored in `askwiz.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::wizard::HistoryOptions;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "askwiz.toml";

/// Wizard configuration (TOML).
///
/// Missing fields default to an in-memory session that offers to load an
/// existing history file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WizardConfig {
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file rewritten after every answer. Unset keeps answers in memory.
    pub path: Option<PathBuf>,

    /// Load an existing history file without asking.
    pub load_if_exists: bool,

    /// Ask before loading an existing history file.
    pub prompt_if_exists: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let options = HistoryOptions::default();
        Self {
            path: None,
            load_if_exists: options.load_if_exists,
            prompt_if_exists: options.prompt_if_exists,
        }
    }
}

impl HistoryConfig {
    pub fn options(&self) -> HistoryOptions {
        HistoryOptions {
            load_if_exists: self.load_if_exists,
            prompt_if_exists: self.prompt_if_exists,
        }
    }
}

impl WizardConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.history.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("history.path must not be empty"));
            }
            if path.is_dir() {
                return Err(anyhow!(
                    "history.path {} is a directory",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WizardConfig::default()`.
pub fn load_config(path: &Path) -> Result<WizardConfig> {
    if !path.exists() {
        return Ok(WizardConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WizardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
