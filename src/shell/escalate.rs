//! Privileged execution through the `exec` sub-command.
//!
//! A privileged step is never shipped to an elevated shell as text. The
//! escalation program re-invokes this binary with the step file and the
//! step's name, and the elevated process runs that one step:
//!
//! ```text
//! sudo /usr/bin/rigger --config /home/me/rigger.yml --var k=v exec mirrors
//! ```

use crate::error::Result;
use crate::shell::command::{execute_program, CommandOptions, CommandResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Everything needed to re-invoke rigger under an escalation program.
#[derive(Debug, Clone)]
pub struct Escalation {
    /// Escalation program (`sudo`, `doas`, ...)
    pub program: String,

    /// Path to the rigger binary
    pub exe: PathBuf,

    /// Absolute path of the step file
    pub config_path: PathBuf,

    /// `--var` overrides to forward
    pub overrides: HashMap<String, String>,
}

impl Escalation {
    /// Build an escalation for the running binary.
    pub fn for_current_exe(
        program: &str,
        config_path: &Path,
        overrides: HashMap<String, String>,
    ) -> Result<Self> {
        Ok(Self {
            program: program.to_string(),
            exe: std::env::current_exe()?,
            config_path: config_path.to_path_buf(),
            overrides,
        })
    }

    /// Arguments passed to the escalation program.
    pub fn args(&self, step: &str) -> Vec<String> {
        let mut args = vec![
            self.exe.display().to_string(),
            "--config".to_string(),
            self.config_path.display().to_string(),
        ];

        let mut overrides: Vec<_> = self.overrides.iter().collect();
        overrides.sort();
        for (key, value) in overrides {
            args.push("--var".to_string());
            args.push(format!("{}={}", key, value));
        }

        args.push("exec".to_string());
        args.push(step.to_string());
        args
    }

    /// Run one step through the escalation program with the terminal attached.
    pub fn run_step(&self, step: &str) -> Result<CommandResult> {
        tracing::debug!(program = %self.program, step, "Escalating step");
        execute_program(&self.program, &self.args(step), &CommandOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escalation() -> Escalation {
        let mut overrides = HashMap::new();
        overrides.insert("user".to_string(), "me".to_string());
        overrides.insert("backup".to_string(), "/mnt/usb".to_string());
        Escalation {
            program: "sudo".to_string(),
            exe: PathBuf::from("/usr/bin/rigger"),
            config_path: PathBuf::from("/home/me/rigger.yml"),
            overrides,
        }
    }

    #[test]
    fn args_name_the_step_only() {
        let args = escalation().args("mirrors");
        assert_eq!(
            args,
            [
                "/usr/bin/rigger",
                "--config",
                "/home/me/rigger.yml",
                "--var",
                "backup=/mnt/usb",
                "--var",
                "user=me",
                "exec",
                "mirrors",
            ]
        );
    }

    #[test]
    fn run_step_uses_escalation_program() {
        let mut esc = escalation();
        // `echo` stands in for sudo and just prints the forwarded arguments.
        esc.program = "echo".to_string();
        let result = esc.run_step("mirrors").unwrap();
        assert!(result.success);
    }

    #[test]
    fn for_current_exe_points_at_test_binary() {
        let esc =
            Escalation::for_current_exe("doas", Path::new("/x/rigger.yml"), HashMap::new())
                .unwrap();
        assert_eq!(esc.program, "doas");
        assert!(esc.exe.exists());
    }
}
