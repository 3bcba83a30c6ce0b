//! Init command implementation.
//!
//! The `rigger init` command writes a commented starter step file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::STEP_FILE_NAME;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Starter step file written by `rigger init`.
pub const STARTER_TEMPLATE: &str = include_str!("../../../templates/rigger.yml");

/// The init command implementation.
pub struct InitCommand {
    cwd: PathBuf,
    config: Option<PathBuf>,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(cwd: &Path, config: Option<PathBuf>, args: InitArgs) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            args,
        }
    }

    /// Where the step file will be written.
    pub fn target(&self) -> PathBuf {
        match &self.config {
            Some(path) => self.cwd.join(path),
            None => self.cwd.join(STEP_FILE_NAME),
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self.target();

        if target.exists() && !self.args.force {
            ui.error(&format!(
                "{} already exists. Use --force to overwrite.",
                target.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, STARTER_TEMPLATE)?;
        tracing::debug!(path = %target.display(), "Wrote starter step file");

        ui.success(&format!("Created {}", target.display()));
        ui.message("  Edit the steps, list packages in packages.txt, then run 'rigger'.");

        Ok(CommandResult::success())
    }
}
