//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::parse_overrides;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Options shared by every command that reads the step file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit step file from `--config` / `RIGGER_CONFIG`.
    pub config: Option<PathBuf>,

    /// Raw `--var KEY=VALUE` arguments.
    pub vars: Vec<String>,
}

impl GlobalOptions {
    /// Take the global options from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            vars: cli.vars.clone(),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    cwd: PathBuf,
    globals: GlobalOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(cwd: PathBuf, globals: GlobalOptions) -> Self {
        Self { cwd, globals }
    }

    /// Get the working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => self.run(merge_run_args(&cli.run, args), ui),
            Some(Commands::List(args)) => {
                let overrides = parse_overrides(&self.globals.vars)?;
                let cmd = super::list::ListCommand::new(
                    &self.cwd,
                    self.globals.config.clone(),
                    overrides,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::Init(args)) => {
                let cmd =
                    super::init::InitCommand::new(&self.cwd, self.globals.config.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Exec(args)) => {
                let overrides = parse_overrides(&self.globals.vars)?;
                let cmd = super::exec::ExecCommand::new(
                    &self.cwd,
                    self.globals.config.clone(),
                    overrides,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            None => self.run(cli.run.clone(), ui),
        }
    }

    fn run(&self, args: RunArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = parse_overrides(&self.globals.vars)?;
        let cmd =
            super::run::RunCommand::new(&self.cwd, self.globals.config.clone(), overrides, args);
        cmd.execute(ui)
    }
}

/// `rigger --yes run --only a` behaves like `rigger run --yes --only a`.
fn merge_run_args(top: &RunArgs, sub: &RunArgs) -> RunArgs {
    let pick = |a: &Vec<String>, b: &Vec<String>| if b.is_empty() { a.clone() } else { b.clone() };
    RunArgs {
        yes: top.yes || sub.yes,
        list: top.list || sub.list,
        force: top.force || sub.force,
        only: pick(&top.only, &sub.only),
        skip: pick(&top.skip, &sub.skip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"), GlobalOptions::default());
        assert_eq!(dispatcher.cwd(), Path::new("/test"));
    }

    #[test]
    fn merges_top_level_run_flags() {
        let top = RunArgs {
            yes: true,
            skip: vec!["fonts".into()],
            ..Default::default()
        };
        let sub = RunArgs {
            only: vec!["mirrors".into()],
            ..Default::default()
        };
        let merged = merge_run_args(&top, &sub);
        assert!(merged.yes);
        assert!(!merged.list);
        assert_eq!(merged.only, ["mirrors"]);
        assert_eq!(merged.skip, ["fonts"]);
    }

    #[test]
    fn bad_var_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["rigger", "--var", "novalue", "list"]).unwrap();
        let dispatcher =
            CommandDispatcher::new(temp.path().to_path_buf(), GlobalOptions::from_cli(&cli));
        let mut ui = MockUI::new();
        assert!(dispatcher.dispatch(&cli, &mut ui).is_err());
    }

    #[test]
    fn default_command_is_run() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("missing.yml");
        let globals = GlobalOptions {
            config: Some(config),
            vars: vec![],
        };
        let cli = Cli::try_parse_from(["rigger"]).unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf(), globals);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("No step file found"));
    }
}
