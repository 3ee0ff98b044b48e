//! Options for multiple-choice questions.

/// Ordered options offered by a choice question.
///
/// `Pairs` maps a returned code to the text shown to the user; `Values` shows
/// and returns the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOptions {
    Pairs(Vec<(String, String)>),
    Values(Vec<String>),
}

impl ChoiceOptions {
    pub fn pairs<C, D>(pairs: impl IntoIterator<Item = (C, D)>) -> Self
    where
        C: Into<String>,
        D: Into<String>,
    {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(code, display)| (code.into(), display.into()))
                .collect(),
        )
    }

    pub fn values<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    /// `(code, display)` pairs in presentation order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Self::Pairs(pairs) => Box::new(
                pairs
                    .iter()
                    .map(|(code, display)| (code.as_str(), display.as_str())),
            ),
            Self::Values(values) => {
                Box::new(values.iter().map(|value| (value.as_str(), value.as_str())))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Pairs(pairs) => pairs.len(),
            Self::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display text for `code`, if it is one of the options.
    pub fn display_for(&self, code: &str) -> Option<&str> {
        self.iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, display)| display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_value_as_code() {
        let options = ChoiceOptions::values(["Red", "Green"]);
        let pairs: Vec<_> = options.iter().collect();
        assert_eq!(pairs, vec![("Red", "Red"), ("Green", "Green")]);
    }

    #[test]
    fn display_for_maps_code_to_text() {
        let options = ChoiceOptions::pairs([("r", "Red"), ("g", "Green")]);
        assert_eq!(options.display_for("g"), Some("Green"));
        assert_eq!(options.display_for("Green"), None);
        assert_eq!(options.len(), 2);
    }
}
