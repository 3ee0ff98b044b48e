//! History file load/save helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::history::HistoryDocument;

const HISTORY_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/history/v1.schema.json"
));

/// Read a history file and validate it (structure + schema).
///
/// Structural checks run first so an unknown node type surfaces as
/// [`crate::WizardError::UnknownHistoryFormat`] rather than a schema message.
pub fn load_history(path: &Path) -> Result<HistoryDocument> {
    debug!(path = %path.display(), "loading history");
    let value = read_json(path)?;
    let document = HistoryDocument::from_value(&value)
        .with_context(|| format!("load history {}", path.display()))?;
    validate_schema(&value).with_context(|| format!("validate {}", path.display()))?;
    debug!(entries = document.questions.len(), "history loaded");
    Ok(document)
}

/// Atomically write a history file (temp file + rename).
pub fn write_history(path: &Path, document: &HistoryDocument) -> Result<()> {
    debug!(path = %path.display(), entries = document.questions.len(), "writing history");
    let mut buf = serde_json::to_string_pretty(document).context("serialize history")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read history {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse history {}", path.display()))
}

fn validate_schema(value: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(HISTORY_SCHEMA).context("parse history schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(value) {
        let messages = compiled
            .iter_errors(value)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "history schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp history {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace history {}", path.display()))?;
    Ok(())
}
