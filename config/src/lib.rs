//! Settings for wait-action.
//!
//! Action inputs come from the runner; this crate covers the optional
//! settings file that tunes the action per repository:
//!
//! ```toml
//! [delay]
//! max_milliseconds = 60000
//!
//! [output]
//! name = "time"
//!
//! [log]
//! filter = "wait_core=debug"
//! ```
//!
//! The file is looked up at `$WAIT_ACTION_CONFIG`, falling back to
//! `.github/wait-action.toml` under `$GITHUB_WORKSPACE` (or the current
//! directory). String values may reference `${VAR}` environment variables.

mod env;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use wait_types::{ActionName, Milliseconds};

pub use env::{EnvSource, ProcessEnv, expand_env_vars};

pub const CONFIG_PATH_ENV: &str = "WAIT_ACTION_CONFIG";
pub const DEFAULT_OUTPUT_NAME: &str = "time";
const WORKSPACE_CONFIG_PATH: [&str; 2] = [".github", "wait-action.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid settings at {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

/// Raw shape of the settings file.
#[derive(Debug, Default, Deserialize)]
pub struct WaitConfig {
    pub delay: Option<DelayConfig>,
    pub output: Option<OutputConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DelayConfig {
    /// Inputs above this value fail the run instead of waiting.
    pub max_milliseconds: Option<Milliseconds>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Output name for the final timestamp. Default: `time`.
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `wait_core=debug`.
    pub filter: Option<String>,
}

/// Resolved settings with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub max_milliseconds: Option<Milliseconds>,
    pub output_name: ActionName,
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_milliseconds: None,
            output_name: default_output_name(),
            log_filter: None,
        }
    }
}

fn default_output_name() -> ActionName {
    ActionName::new(DEFAULT_OUTPUT_NAME).unwrap_or_else(|_| unreachable!("literal is non-empty"))
}

impl WaitConfig {
    /// Parse settings text. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply defaults and `${VAR}` expansion.
    pub fn resolve(self, path: &Path, env: &impl EnvSource) -> Result<Settings, ConfigError> {
        let max_milliseconds = self.delay.and_then(|delay| delay.max_milliseconds);

        let output_name = match self.output.and_then(|output| output.name) {
            Some(raw) => {
                ActionName::new(expand_env_vars(&raw, env)).map_err(|err| ConfigError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("output.name: {err}"),
                })?
            }
            None => default_output_name(),
        };

        let log_filter = self
            .log
            .and_then(|log| log.filter)
            .map(|filter| expand_env_vars(&filter, env))
            .filter(|filter| !filter.trim().is_empty());

        Ok(Settings {
            max_milliseconds,
            output_name,
            log_filter,
        })
    }
}

/// Where to look for the settings file, and whether it must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Named by `$WAIT_ACTION_CONFIG`; a missing file is an error.
    Explicit(PathBuf),
    /// Conventional workspace path; a missing file means defaults.
    Workspace(PathBuf),
}

impl ConfigLocation {
    pub fn discover(env: &impl EnvSource) -> Self {
        if let Some(path) = env.non_empty_var(CONFIG_PATH_ENV) {
            return Self::Explicit(PathBuf::from(path));
        }
        let base = env
            .non_empty_var("GITHUB_WORKSPACE")
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        Self::Workspace(WORKSPACE_CONFIG_PATH.iter().fold(base, |p, c| p.join(c)))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Workspace(path) => path,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&ProcessEnv)
    }

    pub fn load_from(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let location = ConfigLocation::discover(env);
        let path = location.path();

        if matches!(location, ConfigLocation::Workspace(_)) && !path.exists() {
            return Ok(Self::default());
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read settings at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let settings = WaitConfig::parse(&content, path)
            .inspect_err(|err| tracing::warn!("{err}"))?
            .resolve(path, env)?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }
}
