//! Shell command execution.

use crate::error::{Result, RiggerError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Convert a non-zero exit into a `CommandFailed` error.
    pub fn into_result(self, command: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(RiggerError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
            })
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Shell used for `execute` (`<shell> -c <command>`).
    pub shell: String,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: BTreeMap<String, String>,

    /// Capture stdout and stderr instead of inheriting the terminal.
    pub capture: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            cwd: None,
            env: BTreeMap::new(),
            capture: false,
        }
    }
}

/// Run a shell command string through `options.shell`.
///
/// Stdin is always inherited so interactive tools (package managers asking
/// for a password) keep working.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(&options.shell);
    cmd.arg("-c").arg(command);
    run(cmd, command, options)
}

/// Run a program with an explicit argument vector, no shell involved.
pub fn execute_program(
    program: &str,
    args: &[String],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let shown = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    let mut cmd = Command::new(program);
    cmd.args(args);
    run(cmd, &shown, options)
}

/// Execute a command and return success/failure, discarding output.
pub fn execute_check(command: &str, options: &CommandOptions) -> bool {
    let options = CommandOptions {
        capture: true,
        ..options.clone()
    };

    execute(command, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

fn run(mut cmd: Command, shown: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    if options.capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    tracing::debug!(command = %shown, cwd = ?options.cwd, "Spawning command");

    let output = cmd.output().map_err(|source| {
        tracing::debug!(command = %shown, error = %source, "Failed to spawn command");
        RiggerError::CommandSpawn {
            command: shown.to_string(),
            source,
        }
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn captured() -> CommandOptions {
        CommandOptions {
            capture: true,
            ..Default::default()
        }
    }

    #[test]
    fn execute_captures_stdout() {
        let result = execute("echo hello", &captured()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn execute_reports_exit_code() {
        let result = execute("exit 3", &captured()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_passes_env_and_cwd() {
        let temp = TempDir::new().unwrap();
        let mut options = captured();
        options.cwd = Some(temp.path().to_path_buf());
        options.env.insert("GREETING".to_string(), "hi".to_string());

        let result = execute("echo $GREETING; pwd", &options).unwrap();
        let mut lines = result.stdout.lines();
        assert_eq!(lines.next(), Some("hi"));
        let pwd = std::fs::canonicalize(lines.next().unwrap()).unwrap();
        assert_eq!(pwd, std::fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn execute_program_does_not_use_shell() {
        let args = vec!["$HOME".to_string()];
        let result = execute_program("echo", &args, &captured()).unwrap();
        assert_eq!(result.stdout.trim(), "$HOME");
    }

    #[test]
    fn missing_program_reports_os_error() {
        let err = execute_program("rigger-no-such-binary", &[], &captured()).unwrap_err();
        assert!(matches!(err, RiggerError::CommandSpawn { .. }));
        let msg = err.to_string();
        assert!(msg.contains("rigger-no-such-binary"));
        assert!(msg.contains("No such file or directory"), "got: {}", msg);
    }

    #[test]
    fn execute_check_reflects_status() {
        let options = CommandOptions::default();
        assert!(execute_check("true", &options));
        assert!(!execute_check("false", &options));
    }

    #[test]
    fn into_result_maps_failure() {
        let result = execute("exit 1", &captured()).unwrap();
        let err = result.into_result("exit 1").unwrap_err();
        assert!(matches!(err, RiggerError::CommandFailed { code: Some(1), .. }));
    }
}
