//! Turns a loaded step file into runnable [`Step`]s.

use crate::config::{LoadedConfig, StepConfig};
use crate::error::{Result, RiggerError};
use crate::shell::{is_elevated, Escalation};
use crate::steps::command::{CommandAction, CommandGuard, Privilege};
use crate::steps::step::Step;

/// Whether privileged steps must escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Normal invocation; privileged steps escalate unless already root.
    #[default]
    Normal,
    /// Running inside `exec`; never escalate again.
    Elevated,
}

/// Step name filters from `--only` / `--skip`.
#[derive(Debug, Clone, Default)]
pub struct StepFilter {
    /// Keep only these steps (empty keeps all)
    pub only: Vec<String>,
    /// Drop these steps
    pub skip: Vec<String>,
}

impl StepFilter {
    /// Check every named step exists in the step file.
    pub fn validate(&self, loaded: &LoadedConfig) -> Result<()> {
        for name in self.only.iter().chain(&self.skip) {
            if loaded.config.step(name).is_none() {
                return Err(RiggerError::UnknownStep { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Whether a step passes the filter.
    pub fn includes(&self, name: &str) -> bool {
        (self.only.is_empty() || self.only.iter().any(|n| n == name))
            && !self.skip.iter().any(|n| n == name)
    }
}

/// Build one step from its configuration.
pub fn build_step(loaded: &LoadedConfig, config: &StepConfig, mode: ExecutionMode) -> Result<Step> {
    let settings = &loaded.config.settings;
    let items = config.items.as_deref().map(|p| loaded.resolve_path(p));

    let privilege = if config.privileged && mode == ExecutionMode::Normal && !is_elevated() {
        Privilege::Escalate(Escalation::for_current_exe(
            &settings.escalate,
            &loaded.path,
            loaded.context.forwarded(),
        )?)
    } else {
        Privilege::Direct
    };

    let action = CommandAction {
        step: config.name.clone(),
        command: config.command.clone(),
        items: items.clone(),
        cwd: config.cwd.clone(),
        env: config.env.clone(),
        context: loaded.context.clone(),
        base_dir: loaded.base_dir.clone(),
        shell: settings.shell.clone(),
        privilege,
    };

    let mut step = Step::from_action(config.name.clone(), action)
        .critical(config.is_critical(settings))
        .privileged(config.privileged);

    if let Some(description) = &config.description {
        step = step.with_description(description.clone());
    }

    if let Some(check) = &config.check {
        step = step.with_guard(CommandGuard {
            check: check.clone(),
            items,
            context: loaded.context.clone(),
            base_dir: loaded.base_dir.clone(),
            shell: settings.shell.clone(),
        });
    }

    Ok(step)
}

/// Build every step that passes `filter`, in step file order.
pub fn build_steps(
    loaded: &LoadedConfig,
    filter: &StepFilter,
    mode: ExecutionMode,
) -> Result<Vec<Step>> {
    filter.validate(loaded)?;
    loaded
        .config
        .steps
        .iter()
        .filter(|s| filter.includes(&s.name))
        .map(|s| build_step(loaded, s, mode))
        .collect()
}
