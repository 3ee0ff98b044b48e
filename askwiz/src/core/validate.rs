//! Answer validators.
//!
//! A validator takes the cleaned answer and either returns a (possibly
//! converted) value or rejects it. Chains run in order and stop at the first
//! rejection.

use serde_json::Value;

use crate::core::error::ValidationError;
use crate::core::options::ChoiceOptions;

pub trait Validator {
    fn validate(&self, value: Value) -> Result<Value, ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(Value) -> Result<Value, ValidationError>,
{
    fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        self(value)
    }
}

/// Run `validators` in order over `value`.
pub fn run_chain(
    validators: &[Box<dyn Validator + '_>],
    value: Value,
) -> Result<Value, ValidationError> {
    validators
        .iter()
        .try_fold(value, |value, validator| validator.validate(value))
}

/// Map `y`/`yes` to `true` and `n`/`no` to `false`, ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct YesNoValidator;

impl Validator for YesNoValidator {
    fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(ValidationError::failed("Answer must be yes or no"));
        };
        match text.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Value::Bool(true)),
            "n" | "no" => Ok(Value::Bool(false)),
            _ => Err(ValidationError::failed("Answer must be yes or no")),
        }
    }
}

/// Accept an option's display text or its 1-based number; yields the code.
#[derive(Debug, Clone)]
pub struct OptionValidator {
    options: Vec<(String, String)>,
}

impl OptionValidator {
    pub fn new(options: &ChoiceOptions) -> Self {
        Self {
            options: options
                .iter()
                .map(|(code, display)| (code.to_string(), display.to_string()))
                .collect(),
        }
    }
}

impl Validator for OptionValidator {
    fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        let text = value.as_str().ok_or(ValidationError::NotAnOption)?.trim();
        if let Some((code, _)) = self.options.iter().find(|(_, display)| display == text) {
            return Ok(Value::String(code.clone()));
        }
        text.parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.options.get(index))
            .map(|(code, _)| Value::String(code.clone()))
            .ok_or(ValidationError::NotAnOption)
    }
}
