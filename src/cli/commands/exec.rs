//! Exec command implementation.
//!
//! `rigger exec <step>` runs one step's action directly, with no prompt and
//! no guard. Privileged steps are re-invoked this way under the escalation
//! program, so the step never escalates a second time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::ExecArgs;
use crate::error::{Result, RiggerError};
use crate::steps::{build_step, ExecutionMode};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::load_step_file;

/// The exec command implementation.
pub struct ExecCommand {
    cwd: PathBuf,
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
    args: ExecArgs,
}

impl ExecCommand {
    /// Create a new exec command.
    pub fn new(
        cwd: &Path,
        config: Option<PathBuf>,
        overrides: HashMap<String, String>,
        args: ExecArgs,
    ) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            overrides,
            args,
        }
    }
}

impl Command for ExecCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) =
            load_step_file(&self.cwd, self.config.as_deref(), self.overrides.clone(), ui)?
        else {
            return Ok(CommandResult::failure(2));
        };

        let config = loaded
            .config
            .step(&self.args.step)
            .ok_or_else(|| RiggerError::UnknownStep {
                name: self.args.step.clone(),
            })?;

        let mut step = build_step(&loaded, config, ExecutionMode::Elevated)?;
        tracing::debug!(step = %step.name(), "Executing step directly");

        match step.run() {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                ui.error(&format!("{} failed: {:#}", step.name(), e));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
