//! Wall-clock timestamps for the run log.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        DateTime::<FixedOffset>::from(Local::now())
    }
}

/// Time of day with UTC offset, e.g. `14:39:12 GMT+0200`.
#[must_use]
pub fn time_string(at: &DateTime<FixedOffset>) -> String {
    at.format("%H:%M:%S GMT%z").to_string()
}
