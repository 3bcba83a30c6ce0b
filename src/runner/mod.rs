//! Step execution orchestration.
//!
//! - [`StepRunner`] - runs steps in order behind a confirmation prompt
//! - [`RunLog`] - what happened to each step
//! - [`Response`] - parsed operator answers

pub mod confirm;
pub mod run_log;
pub mod step_runner;

pub use confirm::{confirm, Response};
pub use run_log::{Outcome, RunLog, RunLogEntry};
pub use step_runner::{RunOptions, StepRunner};
