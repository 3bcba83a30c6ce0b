//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Answers to confirmation prompts are
//! queued up front; once the queue is empty, `read_answer` reports end of
//! input.
//!
//! # Example
//!
//! ```
//! use rigger::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Starting".to_string()));
//! assert!(ui.has_success("Done"));
//! ```

use std::collections::VecDeque;

use crate::error::Result;
use crate::runner::RunLog;

use super::{OutputMode, UserInterface};

/// A step announcement captured by [`MockUI`]: `(current, total, name, description)`.
pub type ShownStep = (usize, usize, String, Option<String>);

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    skips: Vec<String>,
    headers: Vec<String>,
    steps_shown: Vec<ShownStep>,
    answers: VecDeque<String>,
    prompts_shown: Vec<String>,
    summaries: Vec<RunLog>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Queue answers returned by `read_answer`, in order.
    pub fn queue_answers<I, S>(&mut self, answers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.extend(answers.into_iter().map(Into::into));
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Every step announcement.
    pub fn steps_shown(&self) -> &[ShownStep] {
        &self.steps_shown
    }

    /// Every question asked, including re-asks after invalid input.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Every summary shown.
    pub fn summaries(&self) -> &[RunLog] {
        &self.summaries
    }

    /// Answers still queued.
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_skipped(&self, msg: &str) -> bool {
        self.skips.iter().any(|m| m.contains(msg))
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, description: Option<&str>) {
        self.steps_shown.push((
            current,
            total,
            name.to_string(),
            description.map(str::to_string),
        ));
    }

    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        self.prompts_shown.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    fn show_summary(&mut self, log: &RunLog) {
        self.summaries.push(log.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.info("running");
        ui.warning("careful");
        ui.error("broken");
        ui.skipped("declined");

        assert_eq!(ui.infos(), ["running"]);
        assert!(ui.has_warning("care"));
        assert!(ui.has_error("broke"));
        assert!(ui.has_skipped("declined"));
        assert!(!ui.has_success("anything"));
    }

    #[test]
    fn answers_are_consumed_in_order() {
        let mut ui = MockUI::new();
        ui.queue_answers(["y", "n"]);
        assert_eq!(ui.read_answer("q1").unwrap().as_deref(), Some("y"));
        assert_eq!(ui.remaining_answers(), 1);
        assert_eq!(ui.read_answer("q2").unwrap().as_deref(), Some("n"));
        assert_eq!(ui.read_answer("q3").unwrap(), None);
        assert_eq!(ui.prompts_shown(), ["q1", "q2", "q3"]);
    }

    #[test]
    fn records_summaries() {
        let mut ui = MockUI::new();
        ui.show_summary(&RunLog::new());
        assert_eq!(ui.summaries().len(), 1);
    }
}
