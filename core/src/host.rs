//! Boundary between the action and the runner that hosts it.

use std::path::PathBuf;

use thiserror::Error;
use wait_types::ActionName;

use crate::commands::FileCommandError;
use crate::context::ActionContext;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(ActionName),
    #[error("Missing file at path: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to write to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    FileCommand(#[from] FileCommandError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Fail if the input is absent or empty.
    pub required: bool,
    /// Strip leading and trailing whitespace. Default: true.
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

/// Services the runner provides to an action.
///
/// Logging methods never fail; a sink that cannot be written is dropped.
pub trait ActionHost {
    /// Read an action input. Absent inputs read as an empty string.
    fn input(&self, name: &ActionName, options: InputOptions) -> Result<String, HostError>;

    fn context(&self) -> &ActionContext;

    /// Whether step debug logging is enabled on the runner.
    fn is_debug(&self) -> bool;

    fn debug(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    fn set_output(&mut self, name: &ActionName, value: &str) -> Result<(), HostError>;

    /// Report the run as failed with `message`.
    fn set_failed(&mut self, message: &str);
}
