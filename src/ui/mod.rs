//! User interface: prompts, status lines and the end-of-run summary.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals (stdin answers, styled stdout)
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use rigger::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_answers(["y"]);
//!
//! assert_eq!(ui.read_answer("Run mirrors? [y/N]").unwrap().as_deref(), Some("y"));
//! assert_eq!(ui.read_answer("Run fonts? [y/N]").unwrap(), None);
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, RiggerTheme};

use crate::error::Result;
use crate::runner::RunLog;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display an informational status line.
    fn info(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a skipped/declined message.
    fn skipped(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Announce a step (e.g., "[3/7] fonts  Rebuild font cache").
    fn show_step(&mut self, current: usize, total: usize, name: &str, description: Option<&str>);

    /// Show `question` and read one line of input.
    ///
    /// Returns `Ok(None)` once the input stream has ended.
    fn read_answer(&mut self, question: &str) -> Result<Option<String>>;

    /// Show the end-of-run summary.
    fn show_summary(&mut self, log: &RunLog);
}
