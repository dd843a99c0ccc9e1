//! wait-action - binary entry point.
//!
//! The runner starts this binary with the action inputs in `INPUT_*`
//! variables. It waits, publishes the finish time, and exits non-zero if the
//! run was reported failed.
//!
//! ```text
//! main() -> Settings::load() -> init_tracing() -> GitHubHost::from_env() -> run()
//!                                                                             |
//!                                                                             v
//!                                                  Outcome::Succeeded | Outcome::Failed
//! ```
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! runner log and workflow commands.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use wait_config::{EnvSource, ProcessEnv, Settings};
use wait_core::{ActionHost, GitHubHost, Outcome, SystemClock, run};

const LOG_ENV: &str = "WAIT_ACTION_LOG";

fn init_tracing(settings_filter: Option<&str>, env: &impl EnvSource) {
    let fallback = if env.var("RUNNER_DEBUG").as_deref() == Some("1") {
        "debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| settings_filter.map_or_else(|| EnvFilter::try_new(fallback), EnvFilter::try_new))
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let settings = Settings::load();
    init_tracing(
        settings.as_ref().ok().and_then(|s| s.log_filter.as_deref()),
        &ProcessEnv,
    );

    let mut host = GitHubHost::from_env();
    let outcome = match settings {
        Ok(settings) => run(&mut host, &SystemClock, &settings).await,
        Err(err) => {
            let message = err.to_string();
            tracing::error!(path = %err.path().display(), "Settings could not be loaded");
            host.set_failed(&message);
            Outcome::Failed { message }
        }
    };

    host.flush().context("failed to flush runner log")?;

    Ok(if outcome.is_success() && !host.failed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
