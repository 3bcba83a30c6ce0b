//! rigger - confirm-gated machine provisioning.
//!
//! rigger reads an ordered list of shell steps from a YAML step file and
//! runs them one at a time, asking before each. Failures of non-critical
//! steps are reported and skipped over; a failing critical step ends the
//! run with a non-zero exit status.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Step file loading, interpolation, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The confirm-then-run loop and its run log
//! - [`shell`] - Shell command execution and privilege escalation
//! - [`steps`] - Steps, guards, and building them from the step file
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use rigger::runner::{Outcome, RunOptions, StepRunner};
//! use rigger::steps::Step;
//! use rigger::ui::MockUI;
//!
//! let mut steps = vec![
//!     Step::new("mirrors", || Ok(())).critical(true),
//!     Step::new("fonts", || anyhow::bail!("no fonts in backup")),
//! ];
//!
//! let mut ui = MockUI::new();
//! ui.queue_answers(["y", "y"]);
//!
//! let log = StepRunner::new(RunOptions::default())
//!     .run(&mut steps, &mut ui)
//!     .unwrap();
//! assert_eq!(log.outcome_of("fonts"), Some(Outcome::Failed { critical: false }));
//! assert_eq!(log.exit_code(), 0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{Result, RiggerError};
