//! [`ActionHost`] for the GitHub Actions runner.
//!
//! Inputs arrive as `INPUT_*` variables. Log lines and workflow commands go to
//! the writer (stdout in production). Outputs are appended to `$GITHUB_OUTPUT`
//! when the runner provides it, and fall back to the legacy `::set-output`
//! command otherwise.

use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use wait_config::{EnvSource, ProcessEnv};
use wait_types::ActionName;

use crate::commands::{WorkflowCommand, key_value_entry, new_delimiter};
use crate::context::ActionContext;
use crate::host::{ActionHost, HostError, InputOptions};

pub struct GitHubHost<E = ProcessEnv, W = Stdout> {
    env: E,
    out: W,
    context: ActionContext,
    failed: bool,
}

impl GitHubHost<ProcessEnv, Stdout> {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ProcessEnv, io::stdout())
    }
}

impl<E: EnvSource, W: Write> GitHubHost<E, W> {
    pub fn new(env: E, out: W) -> Self {
        let mut context = ActionContext::gather(&env);
        let notices = context.take_notices();
        let mut host = Self {
            env,
            out,
            context,
            failed: false,
        };
        for notice in &notices {
            host.debug(notice);
        }
        host
    }

    /// Whether [`ActionHost::set_failed`] was called.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!("Failed to write to runner log: {err}");
        }
    }

    fn command(&mut self, command: &WorkflowCommand<'_>) {
        self.line(&command.to_string());
    }

    fn append_file_command(&self, path: &Path, entry: &str) -> Result<(), HostError> {
        if !path.exists() {
            return Err(HostError::MissingFile(path.to_path_buf()));
        }
        let write_err = |source| HostError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(entry.as_bytes()).map_err(write_err)
    }
}

impl<E: EnvSource, W: Write> ActionHost for GitHubHost<E, W> {
    fn input(&self, name: &ActionName, options: InputOptions) -> Result<String, HostError> {
        let value = self.env.var(&name.input_env_key()).unwrap_or_default();
        if options.required && value.is_empty() {
            return Err(HostError::MissingInput(name.clone()));
        }
        if options.trim_whitespace {
            return Ok(value.trim().to_string());
        }
        Ok(value)
    }

    fn context(&self) -> &ActionContext {
        &self.context
    }

    fn is_debug(&self) -> bool {
        self.env.var("RUNNER_DEBUG").as_deref() == Some("1")
    }

    fn debug(&mut self, message: &str) {
        self.command(&WorkflowCommand::new("debug", message));
    }

    fn info(&mut self, message: &str) {
        self.line(message);
    }

    fn warning(&mut self, message: &str) {
        self.command(&WorkflowCommand::new("warning", message));
    }

    fn set_output(&mut self, name: &ActionName, value: &str) -> Result<(), HostError> {
        if let Some(path) = self.env.non_empty_var("GITHUB_OUTPUT") {
            let entry = key_value_entry(name.as_str(), value, &new_delimiter())?;
            return self.append_file_command(&PathBuf::from(path), &entry);
        }

        self.line("");
        self.command(&WorkflowCommand::new("set-output", value).property("name", name.as_str()));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failed = true;
        self.command(&WorkflowCommand::new("error", message));
    }
}
