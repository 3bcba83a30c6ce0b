//! Run command implementation.
//!
//! The `rigger run` command walks the step file in order, asking before
//! each step. It is also what a bare `rigger` invocation does.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::LoadedConfig;
use crate::error::{Result, RiggerError};
use crate::runner::{RunOptions, StepRunner};
use crate::steps::{build_steps, ExecutionMode, StepFilter};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::list::print_names;

/// Load the step file, reporting a missing one through the UI.
///
/// Returns `Ok(None)` after printing a hint when no step file exists;
/// callers exit with code 2.
pub(super) fn load_step_file(
    cwd: &Path,
    config: Option<&Path>,
    overrides: HashMap<String, String>,
    ui: &mut dyn UserInterface,
) -> Result<Option<LoadedConfig>> {
    match LoadedConfig::discover(config, cwd, overrides) {
        Ok(loaded) => Ok(Some(loaded)),
        Err(RiggerError::ConfigNotFound { path }) => {
            ui.error(&format!(
                "No step file found at {}. Run 'rigger init' to create one.",
                path.display()
            ));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// The run command implementation.
pub struct RunCommand {
    cwd: PathBuf,
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(
        cwd: &Path,
        config: Option<PathBuf>,
        overrides: HashMap<String, String>,
        args: RunArgs,
    ) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            overrides,
            args,
        }
    }

    fn filter(&self) -> StepFilter {
        StepFilter {
            only: self.args.only.clone(),
            skip: self.args.skip.clone(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) =
            load_step_file(&self.cwd, self.config.as_deref(), self.overrides.clone(), ui)?
        else {
            return Ok(CommandResult::failure(2));
        };

        let filter = self.filter();

        if self.args.list {
            filter.validate(&loaded)?;
            print_names(&loaded, &filter, ui);
            return Ok(CommandResult::success());
        }

        let mut steps = build_steps(&loaded, &filter, ExecutionMode::Normal)?;

        ui.show_header(&format!(
            "Provisioning {} ({} steps)",
            loaded.config.display_name(),
            steps.len()
        ));

        let runner = StepRunner::new(RunOptions {
            assume_yes: self.args.yes,
            ignore_guards: self.args.force,
        });
        let log = runner.run(&mut steps, ui)?;

        ui.show_summary(&log);
        tracing::debug!(
            path = %loaded.path.display(),
            aborted = log.is_aborted(),
            "Run finished"
        );

        if log.is_aborted() {
            Ok(CommandResult::failure(log.exit_code()))
        } else {
            Ok(CommandResult::success())
        }
    }
}
