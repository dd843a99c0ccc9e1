//! Entry routine: read the delay, wait, publish the finish time.

use thiserror::Error;
use wait_config::Settings;
use wait_types::{ActionName, ActionNameError, DurationParseError, Milliseconds};

use crate::clock::{Clock, time_string};
use crate::delay::wait;
use crate::host::{ActionHost, HostError, InputOptions};

pub const MILLISECONDS_INPUT: &str = "milliseconds";

/// Longest a hosted job may run before the runner cancels it.
pub const JOB_TIME_LIMIT: Milliseconds = Milliseconds::new(6 * 60 * 60 * 1000);

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Duration(#[from] DurationParseError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("invalid input name: {0}")]
    InputName(#[from] ActionNameError),
    #[error("failed to render event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The run finished; `time` is the published output value.
    Succeeded { time: String },
    /// The run was reported failed with `message`.
    Failed { message: String },
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}

/// Run the action against `host`.
///
/// Every error is reported through [`ActionHost::set_failed`]; nothing is
/// retried.
pub async fn run<H, C>(host: &mut H, clock: &C, settings: &Settings) -> Outcome
where
    H: ActionHost,
    C: Clock,
{
    match try_run(host, clock, settings).await {
        Ok(time) => {
            tracing::info!(%time, "Run succeeded");
            Outcome::Succeeded { time }
        }
        Err(err) => {
            let message = err.to_string();
            tracing::error!(%message, "Run failed");
            host.set_failed(&message);
            Outcome::Failed { message }
        }
    }
}

async fn try_run<H, C>(host: &mut H, clock: &C, settings: &Settings) -> Result<String, ActionError>
where
    H: ActionHost,
    C: Clock,
{
    let input = ActionName::new(MILLISECONDS_INPUT)?;
    let raw = host.input(&input, InputOptions::required())?;
    let millis = Milliseconds::parse(&raw)?.check_max(settings.max_milliseconds)?;

    if host.is_debug() {
        let summary = run_summary(&*host);
        host.debug(&summary);
    }
    let payload = serde_json::to_string_pretty(host.context().payload())?;
    host.debug(&format!("The event payload: {payload}"));

    if millis > JOB_TIME_LIMIT {
        host.warning(&format!(
            "Waiting {millis} exceeds the 6 hour job limit; the runner may cancel the job first"
        ));
    }

    host.info(&time_string(&clock.now()));
    let delay = wait(millis);
    tracing::debug!(millis = delay.duration().as_u64(), "Waiting");
    delay.await;
    host.info(&time_string(&clock.now()));

    let time = time_string(&clock.now());
    host.set_output(&settings.output_name, &time)?;
    Ok(time)
}

fn run_summary(host: &impl ActionHost) -> String {
    let ctx = host.context();
    let repo = ctx
        .repo()
        .map_or_else(|_| "unknown repository".to_string(), |r| format!("{}/{}", r.owner, r.repo));
    format!(
        "Triggered by '{}' on {} (run {} attempt {})",
        ctx.event_name, repo, ctx.run_id, ctx.run_attempt
    )
}
