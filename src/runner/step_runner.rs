//! Sequential, confirm-gated execution of steps.

use std::time::Instant;

use crate::error::Result;
use crate::runner::confirm::confirm;
use crate::runner::run_log::{Outcome, RunLog, RunLogEntry};
use crate::steps::Step;
use crate::ui::UserInterface;

/// Options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Treat every prompt as answered with yes.
    pub assume_yes: bool,

    /// Offer steps even when their guard reports them complete.
    pub ignore_guards: bool,
}

/// Runs steps one after another, each behind a confirmation prompt.
///
/// Step failures never surface as `Err`: they are recorded in the
/// [`RunLog`], and a critical failure ends the run early. `Err` means the
/// confirmation input itself broke.
#[derive(Debug, Clone, Default)]
pub struct StepRunner {
    options: RunOptions,
}

impl StepRunner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run `steps` in order.
    pub fn run(&self, steps: &mut [Step], ui: &mut dyn UserInterface) -> Result<RunLog> {
        let mut log = RunLog::new();
        let total = steps.len();

        for (index, step) in steps.iter_mut().enumerate() {
            ui.show_step(index + 1, total, step.name(), step.description());

            let entry = self.run_step(step, ui)?;
            tracing::info!(step = %entry.step, outcome = %entry.outcome, "Step finished");
            log.record(entry);

            if let Some(name) = log.aborted_by() {
                ui.error(&format!("Critical step '{}' failed, stopping", name));
                break;
            }
        }

        Ok(log)
    }

    fn run_step(&self, step: &mut Step, ui: &mut dyn UserInterface) -> Result<RunLogEntry> {
        let name = step.name().to_string();

        if !self.options.ignore_guards {
            if let Some(check) = step.check() {
                tracing::debug!(step = %name, complete = check.complete, "Guard evaluated");
                if check.complete {
                    ui.skipped(&format!(
                        "{} already satisfied ({})",
                        name,
                        check.short_description()
                    ));
                    return Ok(RunLogEntry {
                        step: name,
                        outcome: Outcome::Satisfied,
                        duration: None,
                        detail: Some(check.description),
                    });
                }
            }
        }

        let confirmed = self.options.assume_yes || confirm(ui, &name)?;
        if !confirmed {
            ui.skipped(&format!("{} declined", name));
            return Ok(RunLogEntry {
                step: name,
                outcome: Outcome::Declined,
                duration: None,
                detail: None,
            });
        }

        ui.info(&format!("Running {}", name));
        let start = Instant::now();
        let result = step.run();
        let duration = start.elapsed();

        let entry = match result {
            Ok(()) => {
                ui.success(&format!("{} completed", name));
                RunLogEntry {
                    step: name,
                    outcome: Outcome::Succeeded,
                    duration: Some(duration),
                    detail: None,
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                let critical = step.is_critical();
                if critical {
                    ui.error(&format!("{} failed: {}", name, message));
                } else {
                    ui.warning(&format!("{} failed, continuing: {}", name, message));
                }
                RunLogEntry {
                    step: name,
                    outcome: Outcome::Failed { critical },
                    duration: Some(duration),
                    detail: Some(message),
                }
            }
        };

        Ok(entry)
    }
}
