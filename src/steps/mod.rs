//! Steps: the model, guards, and the step file bindings.
//!
//! - [`Step`] - a named action with a criticality flag and optional guard
//! - [`Action`] / [`Guard`] - the two seams a step is built from
//! - [`run_check`] - completed checks from the step file
//! - [`CommandAction`] - runs a step file command (directly or escalated)
//! - [`build_steps`] - turn a loaded step file into steps
//!
//! # Example
//!
//! ```
//! use rigger::steps::{CheckResult, Step};
//!
//! let step = Step::new("hello", || {
//!     println!("hello");
//!     Ok(())
//! })
//! .critical(true)
//! .with_guard(|| CheckResult::incomplete("never done", "always offered"));
//!
//! assert!(step.is_critical());
//! assert!(!step.check().unwrap().complete);
//! ```

pub mod command;
pub mod completed_check;
pub mod registry;
pub mod step;

pub use command::{read_items, CommandAction, CommandGuard, Privilege};
pub use completed_check::{run_check, CheckEnv, CheckResult};
pub use registry::{build_step, build_steps, ExecutionMode, StepFilter};
pub use step::{Action, Guard, Step};
