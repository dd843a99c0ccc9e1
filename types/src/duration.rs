//! Validated delay duration.
//!
//! Raw action inputs arrive as strings. [`Milliseconds::parse`] is the only
//! path from a raw string to a duration, so a non-numeric or negative value
//! can never reach the timer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("milliseconds not supplied")]
    Empty,
    #[error("milliseconds not a number: '{raw}'")]
    NotANumber { raw: String },
    #[error("milliseconds must not be negative (got {raw})")]
    Negative { raw: String },
    #[error("milliseconds out of range: {raw}")]
    OutOfRange { raw: String },
    #[error("milliseconds {value} exceeds the configured maximum of {max}")]
    AboveMaximum { value: u64, max: u64 },
}

/// A non-negative number of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(u64);

impl Milliseconds {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse a raw input value.
    ///
    /// Surrounding whitespace is ignored. The remainder must be a base-10
    /// integer with an optional leading `+`; trailing units or fractions are
    /// rejected rather than truncated.
    pub fn parse(raw: &str) -> Result<Self, DurationParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DurationParseError::Empty);
        }

        if let Ok(value) = trimmed.parse::<u64>() {
            return Ok(Self(value));
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DurationParseError::NotANumber {
                raw: trimmed.to_string(),
            });
        }

        if negative {
            // "-0" is still zero.
            if digits.bytes().all(|b| b == b'0') {
                return Ok(Self::ZERO);
            }
            return Err(DurationParseError::Negative {
                raw: trimmed.to_string(),
            });
        }

        Err(DurationParseError::OutOfRange {
            raw: trimmed.to_string(),
        })
    }

    /// Reject values above `max`, if a maximum is set.
    pub fn check_max(self, max: Option<Milliseconds>) -> Result<Self, DurationParseError> {
        match max {
            Some(max) if self > max => Err(DurationParseError::AboveMaximum {
                value: self.0,
                max: max.0,
            }),
            _ => Ok(self),
        }
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<u64> for Milliseconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Milliseconds> for Duration {
    fn from(value: Milliseconds) -> Self {
        value.as_duration()
    }
}

impl fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
