//! Runner workflow commands.
//!
//! Two channels reach the runner: `::name key=value::data` lines on stdout,
//! and "file commands" appended to files named by environment variables
//! (`GITHUB_OUTPUT` and friends). Multi-line file command values use a
//! heredoc with a random delimiter.

use std::fmt;

use thiserror::Error;

/// Escape command data (the part after the final `::`).
#[must_use]
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value.
#[must_use]
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// A single stdout workflow command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCommand<'a> {
    name: &'a str,
    properties: Vec<(&'a str, &'a str)>,
    message: &'a str,
}

impl<'a> WorkflowCommand<'a> {
    #[must_use]
    pub fn new(name: &'a str, message: &'a str) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message,
        }
    }

    #[must_use]
    pub fn property(mut self, key: &'a str, value: &'a str) -> Self {
        self.properties.push((key, value));
        self
    }
}

impl fmt::Display for WorkflowCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;
        for (idx, (key, value)) in self.properties.iter().enumerate() {
            let sep = if idx == 0 { ' ' } else { ',' };
            write!(f, "{sep}{key}={}", escape_property(value))?;
        }
        write!(f, "::{}", escape_data(self.message))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileCommandError {
    #[error("name '{0}' contains the file command delimiter")]
    DelimiterInName(String),
    #[error("value for '{0}' contains the file command delimiter")]
    DelimiterInValue(String),
}

/// Heredoc delimiter for one file command entry.
#[must_use]
pub fn new_delimiter() -> String {
    format!("ghadelimiter_{}", uuid::Uuid::new_v4())
}

/// Render a `name<<delimiter` entry, including the trailing newline.
pub fn key_value_entry(
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<String, FileCommandError> {
    if name.contains(delimiter) {
        return Err(FileCommandError::DelimiterInName(name.to_string()));
    }
    if value.contains(delimiter) {
        return Err(FileCommandError::DelimiterInValue(name.to_string()));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}
