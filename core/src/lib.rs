//! Core logic for wait-action.
//!
//! - [`delay`]: the delay primitive, a single suspend/resume on the tokio timer
//! - [`host`]: the boundary trait for runner services
//! - [`github`]: that boundary for the GitHub Actions runner
//! - [`run`]: the entry routine tying input, delay and output together

mod clock;
pub mod commands;
pub mod context;
pub mod delay;
pub mod github;
pub mod host;
mod run;

pub use clock::{Clock, SystemClock, time_string};
pub use context::{ActionContext, ContextError, Repo};
pub use delay::{Delay, DelayState, wait};
pub use github::GitHubHost;
pub use host::{ActionHost, HostError, InputOptions};
pub use run::{ActionError, JOB_TIME_LIMIT, MILLISECONDS_INPUT, Outcome, run};
