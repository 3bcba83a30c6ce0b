//! Terminal UI.

use console::Term;
use std::io::{BufRead, BufReader, Write};

use crate::error::Result;
use crate::runner::{Outcome, RunLog};

use super::{format_duration, should_use_colors, OutputMode, RiggerTheme, UserInterface};

/// Terminal UI: styled output on stdout, errors on stderr, answers from stdin.
pub struct TerminalUI {
    out: Term,
    err: Term,
    input: Box<dyn BufRead>,
    theme: RiggerTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI reading answers from stdin.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_input(mode, Box::new(BufReader::new(std::io::stdin())))
    }

    /// Create a terminal UI reading answers from `input`.
    pub fn with_input(mode: OutputMode, input: Box<dyn BufRead>) -> Self {
        let theme = if should_use_colors() {
            RiggerTheme::new()
        } else {
            RiggerTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            input,
            theme,
            mode,
        }
    }

    fn status_line(&mut self, line: String) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn info(&mut self, msg: &str) {
        let line = self.theme.format_info(msg);
        self.status_line(line);
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.status_line(line);
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.status_line(line);
    }

    fn show_header(&mut self, title: &str) {
        let line = format!("\n{}\n", self.theme.format_header(title));
        self.status_line(line);
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, description: Option<&str>) {
        let mut line = format!(
            "{} {}",
            self.theme.dim.apply_to(format!("[{}/{}]", current, total)),
            self.theme.highlight.apply_to(name)
        );
        if let Some(description) = description {
            line.push_str(&format!("  {}", self.theme.dim.apply_to(description)));
        }
        writeln!(self.out).ok();
        writeln!(self.out, "{}", line).ok();
    }

    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{} ", self.theme.prompt.apply_to(question))?;
        self.out.flush()?;

        // Undecodable bytes become U+FFFD and re-prompt as an invalid answer.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.out).ok();
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    fn show_summary(&mut self, log: &RunLog) {
        let b = &self.theme.border;

        writeln!(self.out).ok();
        writeln!(
            self.out,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for entry in log.entries() {
            let right_side = match (entry.duration, &entry.detail) {
                (_, Some(detail))
                    if self.mode.shows_details() || matches!(entry.outcome, Outcome::Failed { .. }) =>
                {
                    self.theme.dim.apply_to(detail).to_string()
                }
                (Some(duration), _) => self.theme.dim.apply_to(format_duration(duration)).to_string(),
                _ => self.theme.dim.apply_to(entry.outcome.label()).to_string(),
            };

            writeln!(
                self.out,
                "  {} {} {:<20} {}",
                b.apply_to("│"),
                self.theme.outcome_icon(entry.outcome),
                entry.step,
                right_side,
            )
            .ok();
        }

        writeln!(
            self.out,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        writeln!(
            self.out,
            "  {} {} run {} {} failed {} {} skipped {} {}",
            b.apply_to("│"),
            log.count(Outcome::is_confirmed),
            self.theme.dim.apply_to("·"),
            log.count(|o| matches!(o, Outcome::Failed { .. })),
            self.theme.dim.apply_to("·"),
            log.count(|o| !o.is_confirmed()),
            self.theme.dim.apply_to("·"),
            self.theme.dim.apply_to(format_duration(log.total_duration())),
        )
        .ok();
        writeln!(
            self.out,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{confirm, Response};
    use std::io::Cursor;

    fn ui_with_input(input: &str) -> TerminalUI {
        TerminalUI::with_input(OutputMode::Quiet, Box::new(Cursor::new(input.to_string())))
    }

    #[test]
    fn reads_lines_in_order() {
        let mut ui = ui_with_input("maybe\ny\n");
        assert_eq!(ui.read_answer("Run a?").unwrap().as_deref(), Some("maybe\n"));
        assert_eq!(ui.read_answer("Run a?").unwrap().as_deref(), Some("y\n"));
    }

    #[test]
    fn empty_line_is_an_answer() {
        let mut ui = ui_with_input("\n");
        assert_eq!(ui.read_answer("Run a?").unwrap().as_deref(), Some("\n"));
    }

    #[test]
    fn eof_returns_none() {
        let mut ui = ui_with_input("");
        assert_eq!(ui.read_answer("Run a?").unwrap(), None);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut ui = ui_with_input("n");
        assert_eq!(ui.read_answer("Run a?").unwrap().as_deref(), Some("n"));
        assert_eq!(ui.read_answer("Run a?").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_an_answer_not_an_error() {
        let input: &[u8] = b"\xff\xfe\ny\n";
        let mut ui = TerminalUI::with_input(OutputMode::Quiet, Box::new(Cursor::new(input.to_vec())));
        let answer = ui.read_answer("Run a?").unwrap().unwrap();
        assert_eq!(Response::parse(&answer), Response::Invalid);
        assert_eq!(ui.read_answer("Run a?").unwrap().as_deref(), Some("y\n"));
    }

    #[test]
    fn invalid_utf8_reprompts_through_confirm() {
        let input: &[u8] = b"\xc3\x28\nn\n";
        let mut ui = TerminalUI::with_input(OutputMode::Quiet, Box::new(Cursor::new(input.to_vec())));
        assert!(!confirm(&mut ui, "fonts").unwrap());
    }

    #[test]
    fn output_mode_is_kept() {
        let ui = ui_with_input("");
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
