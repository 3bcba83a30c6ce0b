//! The yes/no confirmation gate.

use crate::error::{Result, RiggerError};
use crate::ui::UserInterface;

/// An operator's answer, parsed once at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
    Invalid,
}

impl Response {
    /// `y`/`Y` is yes; `n`/`N` or an empty line is no; anything else is invalid.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "y" | "Y" => Self::Yes,
            "" | "n" | "N" => Self::No,
            _ => Self::Invalid,
        }
    }
}

/// Ask whether to run `step` until a valid answer arrives.
///
/// There is no retry limit. The only way out besides a valid answer is the
/// input stream ending, which is a runner failure.
pub fn confirm(ui: &mut dyn UserInterface, step: &str) -> Result<bool> {
    let question = format!("Run {}? [y/N]", step);

    loop {
        let answer = ui
            .read_answer(&question)?
            .ok_or_else(|| RiggerError::InputClosed {
                step: step.to_string(),
            })?;

        match Response::parse(&answer) {
            Response::Yes => return Ok(true),
            Response::No => return Ok(false),
            Response::Invalid => {
                tracing::debug!(step, answer = %answer.trim(), "Rejected confirmation input");
                ui.warning(&format!("Please answer 'y' or 'n' (got '{}')", answer.trim()));
            }
        }
    }
}
