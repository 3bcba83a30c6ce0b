//! Shell completions generation.
//!
//! `rigger completions <shell>` prints a completion script on stdout, e.g.
//! `rigger completions bash > ~/.local/share/bash-completion/completions/rigger`.
//! The scripts cover the top-level `--yes`/`--list` flags and the run
//! filters. The `exec` subcommand used for privileged steps is hidden and
//! never completed.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the completion script for the chosen shell to `out`.
    pub fn write_to(&self, out: &mut dyn std::io::Write) {
        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_string();
        clap_complete::generate(self.args.shell, &mut cmd, bin, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.write_to(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn generate(shell: Shell) -> String {
        let mut buf = Vec::new();
        CompletionsCommand::new(CompletionsArgs { shell }).write_to(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn generates_bash_completions() {
        let output = generate(Shell::Bash);
        assert!(output.contains("rigger"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        assert!(generate(Shell::Zsh).contains("rigger"));
    }

    #[test]
    fn fish_completes_run_flags_but_not_exec() {
        let output = generate(Shell::Fish);
        assert!(output.contains("complete -c rigger"));
        assert!(output.contains("-l yes"));
        assert!(output.contains("-l only"));
        assert!(!output.contains("\"exec\""));
    }
}
