//! Shell command execution and privilege escalation.

pub mod command;
pub mod escalate;
pub mod platform;

pub use command::{execute, execute_check, execute_program, CommandOptions, CommandResult};
pub use escalate::Escalation;
pub use platform::is_elevated;
