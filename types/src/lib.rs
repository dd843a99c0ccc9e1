//! Core domain types for wait-action.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the action.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod duration;
mod name;

pub use duration::{DurationParseError, Milliseconds};
pub use name::{ActionName, ActionNameError};
