//! List command implementation.
//!
//! The `rigger list` command shows the steps of the step file without
//! running anything.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::{LoadedConfig, StepConfig};
use crate::error::Result;
use crate::steps::StepFilter;
use crate::ui::{should_use_colors, RiggerTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::run::load_step_file;

/// A step as reported by `rigger list --json`.
#[derive(Debug, Serialize)]
pub struct ListedStep<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub critical: bool,
    pub privileged: bool,
    pub guarded: bool,
    pub items: bool,
}

impl<'a> ListedStep<'a> {
    fn new(loaded: &LoadedConfig, step: &'a StepConfig) -> Self {
        Self {
            name: &step.name,
            description: step.description.as_deref(),
            critical: step.is_critical(&loaded.config.settings),
            privileged: step.privileged,
            guarded: step.check.is_some(),
            items: step.items.is_some(),
        }
    }
}

/// Print the names of the steps that pass `filter`, one per line.
pub fn print_names(loaded: &LoadedConfig, filter: &StepFilter, ui: &mut dyn UserInterface) {
    for step in loaded.config.steps.iter().filter(|s| filter.includes(&s.name)) {
        ui.message(&step.name);
    }
}

/// The list command implementation.
pub struct ListCommand {
    cwd: PathBuf,
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(
        cwd: &Path,
        config: Option<PathBuf>,
        overrides: HashMap<String, String>,
        args: ListArgs,
    ) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            overrides,
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) =
            load_step_file(&self.cwd, self.config.as_deref(), self.overrides.clone(), ui)?
        else {
            return Ok(CommandResult::failure(2));
        };

        let listed: Vec<_> = loaded
            .config
            .steps
            .iter()
            .map(|s| ListedStep::new(&loaded, s))
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&listed).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = if should_use_colors() {
            RiggerTheme::new()
        } else {
            RiggerTheme::plain()
        };

        let quiet = !ui.output_mode().shows_status();
        if !quiet {
            ui.message(&format!(
                "  {}",
                theme.header.apply_to(format!("Steps in {}:", loaded.path.display()))
            ));
        }
        for (index, step) in listed.iter().enumerate() {
            let mut tags = Vec::new();
            if step.critical {
                tags.push("critical");
            }
            if step.privileged {
                tags.push("privileged");
            }
            if step.guarded {
                tags.push("guarded");
            }
            if step.items {
                tags.push("items");
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" {}", theme.dim.apply_to(format!("[{}]", tags.join(", "))))
            };

            ui.message(&format!(
                "  {:>3}. {}{}",
                index + 1,
                theme.highlight.apply_to(step.name),
                tags
            ));
            if let Some(description) = step.description.filter(|_| !quiet) {
                ui.message(&format!("       {}", theme.dim.apply_to(description)));
            }
        }

        Ok(CommandResult::success())
    }
}
