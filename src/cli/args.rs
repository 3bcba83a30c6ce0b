//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// rigger - confirm-gated machine provisioning steps.
#[derive(Debug, Parser)]
#[command(name = "rigger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the step file (overrides ./rigger.yml)
    #[arg(short, long, global = true, env = "RIGGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Set a step file variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", global = true)]
    pub vars: Vec<String>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Run options; also merged into an explicit `run`
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the steps (default if no command specified)
    Run(RunArgs),

    /// List steps without running them
    List(ListArgs),

    /// Write a starter step file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Run a single step without prompting (used for privileged steps)
    #[command(hide = true)]
    Exec(ExecArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Answer yes to every prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the step names and exit
    #[arg(long)]
    pub list: bool,

    /// Offer steps even when their check says they are done
    #[arg(short, long)]
    pub force: bool,

    /// Run only these steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing step file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExecArgs {
    /// Step to run
    pub step: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_means_default_run() {
        let cli = Cli::try_parse_from(["rigger"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.run.yes);
    }

    #[test]
    fn top_level_yes_and_list() {
        let cli = Cli::try_parse_from(["rigger", "--yes"]).unwrap();
        assert!(cli.run.yes);
        let cli = Cli::try_parse_from(["rigger", "--list"]).unwrap();
        assert!(cli.run.list);
    }

    #[test]
    fn run_subcommand_flags() {
        let cli =
            Cli::try_parse_from(["rigger", "run", "-y", "--only", "a,b", "--skip", "c"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.yes);
                assert_eq!(args.only, ["a", "b"]);
                assert_eq!(args.skip, ["c"]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rigger", "exec", "mirrors", "--config", "/x.yml", "--var", "a=b",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/x.yml")));
        assert_eq!(cli.vars, ["a=b"]);
        assert!(matches!(cli.command, Some(Commands::Exec(ExecArgs { step })) if step == "mirrors"));
    }

    #[test]
    fn global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["rigger", "--config", "/x.yml", "list", "--json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/x.yml")));
        assert!(matches!(cli.command, Some(Commands::List(ListArgs { json: true }))));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["rigger", "-v", "-q"]).is_err());
    }
}
