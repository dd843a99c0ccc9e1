//! Run context: which event triggered the run, where, and by whom.
//!
//! Pure data plus accessors. Gathering from the environment happens once in
//! [`ActionContext::gather`]; all fallbacks are resolved there.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use wait_config::EnvSource;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context.repo requires a GITHUB_REPOSITORY environment variable like 'owner/repo'")]
    MissingRepository,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionContext {
    pub event_name: String,
    pub sha: String,
    pub git_ref: String,
    pub workflow: String,
    pub action: String,
    pub actor: String,
    pub job: String,
    pub run_attempt: u64,
    pub run_number: u64,
    pub run_id: u64,
    pub api_url: String,
    pub server_url: String,
    pub graphql_url: String,
    repository: Option<Repo>,
    payload: Value,
    // Problems found while gathering, for the host's debug channel.
    notices: Vec<String>,
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            sha: String::new(),
            git_ref: String::new(),
            workflow: String::new(),
            action: String::new(),
            actor: String::new(),
            job: String::new(),
            run_attempt: 0,
            run_number: 0,
            run_id: 0,
            api_url: DEFAULT_API_URL.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            repository: None,
            payload: Value::Object(Map::new()),
            notices: Vec::new(),
        }
    }
}

impl ActionContext {
    /// Collect the run context from `GITHUB_*` variables and the event file.
    ///
    /// A missing or unparseable event file leaves the payload as `{}` and
    /// records a notice, see [`ActionContext::take_notices`].
    #[must_use]
    pub fn gather(env: &impl EnvSource) -> Self {
        let text = |key: &str| env.var(key).unwrap_or_default();
        let number = |key: &str| {
            env.var(key)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .unwrap_or_default()
        };
        let url = |key: &str, default: &str| {
            env.non_empty_var(key)
                .unwrap_or_else(|| default.to_string())
        };

        let mut notices = Vec::new();
        let payload = match env.non_empty_var("GITHUB_EVENT_PATH") {
            Some(path) => read_payload(Path::new(&path)).unwrap_or_else(|notice| {
                notices.push(notice);
                Value::Object(Map::new())
            }),
            None => Value::Object(Map::new()),
        };

        Self {
            event_name: text("GITHUB_EVENT_NAME"),
            sha: text("GITHUB_SHA"),
            git_ref: text("GITHUB_REF"),
            workflow: text("GITHUB_WORKFLOW"),
            action: text("GITHUB_ACTION"),
            actor: text("GITHUB_ACTOR"),
            job: text("GITHUB_JOB"),
            run_attempt: number("GITHUB_RUN_ATTEMPT"),
            run_number: number("GITHUB_RUN_NUMBER"),
            run_id: number("GITHUB_RUN_ID"),
            api_url: url("GITHUB_API_URL", DEFAULT_API_URL),
            server_url: url("GITHUB_SERVER_URL", DEFAULT_SERVER_URL),
            graphql_url: url("GITHUB_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
            repository: env
                .var("GITHUB_REPOSITORY")
                .as_deref()
                .and_then(parse_repository),
            payload,
            notices,
        }
    }

    /// Event payload as delivered by the runner.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn repo(&self) -> Result<&Repo, ContextError> {
        self.repository.as_ref().ok_or(ContextError::MissingRepository)
    }

    /// Drain the notices recorded by [`ActionContext::gather`].
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

fn parse_repository(raw: &str) -> Option<Repo> {
    let (owner, repo) = raw.trim().split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some(Repo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

fn read_payload(path: &Path) -> Result<Value, String> {
    if !path.exists() {
        return Err(format!("GITHUB_EVENT_PATH {} does not exist", path.display()));
    }
    let content = std::fs::read_to_string(path).map_err(|err| {
        tracing::warn!(path = %path.display(), "GITHUB_EVENT_PATH is not readable: {err}");
        format!("GITHUB_EVENT_PATH {} is not readable: {err}", path.display())
    })?;
    serde_json::from_str(&content).map_err(|err| {
        tracing::warn!(path = %path.display(), "Event payload is not valid JSON: {err}");
        format!("Event payload at {} is not valid JSON: {err}", path.display())
    })
}
