//! Input and output names.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionNameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must not contain line breaks: {0:?}")]
    LineBreak(String),
}

/// A trimmed, single-line, non-empty input or output name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionName(String);

impl ActionName {
    pub fn new(value: impl Into<String>) -> Result<Self, ActionNameError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ActionNameError::Empty);
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(ActionNameError::LineBreak(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Environment variable the runner uses to pass this input.
    ///
    /// `milliseconds` -> `INPUT_MILLISECONDS`, `who to greet` -> `INPUT_WHO_TO_GREET`.
    #[must_use]
    pub fn input_env_key(&self) -> String {
        format!("INPUT_{}", self.0.replace(' ', "_").to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActionName {
    type Error = ActionNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ActionName {
    type Error = ActionNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionName> for String {
    fn from(value: ActionName) -> Self {
        value.0
    }
}

impl AsRef<str> for ActionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
