//! The present/validate retry loop shared by every question kind.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::core::error::ValidationError;
use crate::core::validate::{Validator, run_chain};
use crate::io::presenter::Presenter;

/// Accepted answer of one ask.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOutcome {
    /// Raw input after default substitution; what the history stores.
    pub raw: Option<String>,
    /// Output of the validator chain, or `null` for an optional question
    /// left unanswered.
    pub value: Value,
}

/// Present until an answer passes every validator.
///
/// Blank input takes `default`. Missing answers to required questions and
/// validator rejections are reported through `inform` and re-prompted; only
/// presenter and `inform` failures end the loop early.
pub fn ask_until_valid<P, I>(
    presenter: &mut P,
    default: Option<&str>,
    required: bool,
    validators: &[Box<dyn Validator + '_>],
    mut inform: I,
) -> Result<AskOutcome>
where
    P: Presenter + ?Sized,
    I: FnMut(&str) -> Result<()>,
{
    loop {
        let input = clean_input(presenter.present()?);
        let Some(raw) = input.or_else(|| default.map(str::to_string)) else {
            if required {
                debug!("answer required; asking again");
                inform(&report(&ValidationError::AnswerRequired))?;
                continue;
            }
            return Ok(AskOutcome {
                raw: None,
                value: Value::Null,
            });
        };

        match run_chain(validators, Value::String(raw.clone())) {
            Ok(value) => {
                return Ok(AskOutcome {
                    raw: Some(raw),
                    value,
                });
            }
            Err(err) => {
                debug!(error = %err, "answer rejected; asking again");
                inform(&report(&err))?;
            }
        }
    }
}

/// Trimmed input, or `None` when the user typed nothing.
fn clean_input(input: Option<String>) -> Option<String> {
    input
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn report(err: &ValidationError) -> String {
    match err {
        ValidationError::AnswerRequired => "Answer required".to_string(),
        other => format!("Problem with answer: {other}"),
    }
}
