//! Step actions and guards backed by shell commands from the step file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::CompletedCheck;
use crate::shell::{execute, CommandOptions, Escalation};
use crate::steps::completed_check::{run_check, CheckEnv, CheckResult};
use crate::steps::step::{Action, Guard};

/// Read an items file: one item per line, blank lines and `#` comments skipped.
pub fn read_items(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Interpolation contexts for one run of a step: one per item, or just the
/// base context when the step has no items file.
fn contexts(
    base: &InterpolationContext,
    items: Option<&Path>,
) -> anyhow::Result<Vec<InterpolationContext>> {
    match items {
        Some(path) => Ok(read_items(path)?
            .iter()
            .map(|item| base.for_item(item))
            .collect()),
        None => Ok(vec![base.clone()]),
    }
}

/// How a command action reaches the shell.
#[derive(Debug, Clone)]
pub enum Privilege {
    /// Run in this process's context.
    Direct,
    /// Re-invoke rigger through an escalation program.
    Escalate(Escalation),
}

/// Runs a step file command, once or once per item.
#[derive(Debug, Clone)]
pub struct CommandAction {
    /// Step name (forwarded when escalating)
    pub step: String,
    /// Command template
    pub command: String,
    /// Absolute path of the items file
    pub items: Option<PathBuf>,
    /// Working directory template
    pub cwd: Option<String>,
    /// Environment templates
    pub env: BTreeMap<String, String>,
    /// Interpolation context
    pub context: InterpolationContext,
    /// Directory relative `cwd` values resolve against
    pub base_dir: PathBuf,
    /// Shell program
    pub shell: String,
    /// Direct or escalated execution
    pub privilege: Privilege,
}

impl CommandAction {
    fn options(&self, ctx: &InterpolationContext) -> anyhow::Result<CommandOptions> {
        // Commands run from the step file's directory unless `cwd` says otherwise.
        let cwd = match self.cwd.as_deref() {
            Some(cwd) => self.base_dir.join(resolve_string(cwd, ctx)?),
            None => self.base_dir.clone(),
        };

        let env = self
            .env
            .iter()
            .map(|(key, value)| Ok((key.clone(), resolve_string(value, ctx)?)))
            .collect::<crate::error::Result<BTreeMap<_, _>>>()?;

        Ok(CommandOptions {
            shell: self.shell.clone(),
            cwd: Some(cwd),
            env,
            capture: false,
        })
    }

    fn run_direct(&self) -> anyhow::Result<()> {
        let runs = contexts(&self.context, self.items.as_deref())?;
        if runs.is_empty() {
            tracing::info!(step = %self.step, "Items file is empty, nothing to do");
        }

        for ctx in &runs {
            let command = resolve_string(&self.command, ctx)?;
            let options = self.options(ctx)?;
            execute(&command, &options)?.into_result(&command)?;
        }

        Ok(())
    }

    fn run_escalated(&self, escalation: &Escalation) -> anyhow::Result<()> {
        let result = escalation.run_step(&self.step)?;
        if !result.success {
            bail!(
                "privileged run via {} exited with code {:?}",
                escalation.program,
                result.exit_code
            );
        }
        Ok(())
    }
}

impl Action for CommandAction {
    fn run(&mut self) -> anyhow::Result<()> {
        match &self.privilege {
            Privilege::Direct => self.run_direct(),
            Privilege::Escalate(escalation) => self.run_escalated(escalation),
        }
    }
}

/// Guard built from a step's `check:` block.
#[derive(Debug, Clone)]
pub struct CommandGuard {
    /// The configured check
    pub check: CompletedCheck,
    /// Absolute path of the items file
    pub items: Option<PathBuf>,
    /// Interpolation context
    pub context: InterpolationContext,
    /// Base for relative paths and cwd of check commands
    pub base_dir: PathBuf,
    /// Shell program
    pub shell: String,
}

impl Guard for CommandGuard {
    fn check(&self) -> CheckResult {
        let runs = match contexts(&self.context, self.items.as_deref()) {
            Ok(runs) => runs,
            Err(e) => return CheckResult::incomplete("Items file unreadable", format!("{:#}", e)),
        };

        let mut last = None;
        for ctx in &runs {
            let env = CheckEnv {
                context: ctx,
                base_dir: &self.base_dir,
                shell: &self.shell,
            };
            let result = run_check(&self.check, env);
            tracing::debug!(complete = result.complete, check = %result.description, "Evaluated guard");
            if !result.complete {
                return result;
            }
            last = Some(result);
        }

        match (self.items.is_some(), last) {
            (false, Some(result)) => result,
            _ => CheckResult::complete(format!("All {} items present", runs.len())),
        }
    }
}
