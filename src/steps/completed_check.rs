//! Completed check implementations.
//!
//! Completed checks determine if a step's work is already in place and the
//! step can be left out of the run.

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::CompletedCheck;
use crate::shell::{execute_check, CommandOptions};
use std::path::Path;

/// Result of running a completed check.
///
/// The `description` field is user-visible: it appears in skip messages
/// and in the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Whether the check passed (step is complete).
    pub complete: bool,

    /// Description of what was checked.
    pub description: String,

    /// Details about the check result.
    pub details: Option<String>,
}

impl CheckResult {
    /// Create a complete result.
    pub fn complete(description: impl Into<String>) -> Self {
        Self {
            complete: true,
            description: description.into(),
            details: None,
        }
    }

    /// Create an incomplete result.
    pub fn incomplete(description: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            complete: false,
            description: description.into(),
            details: Some(details.into()),
        }
    }

    /// Get a short, display-friendly description with common prefixes stripped.
    pub fn short_description(&self) -> &str {
        const PREFIXES: &[&str] = &[
            "Command succeeded: ",
            "Command failed: ",
            "File exists: ",
            "File missing: ",
            "Check passed: ",
        ];
        for prefix in PREFIXES {
            if let Some(rest) = self.description.strip_prefix(prefix) {
                return rest;
            }
        }
        &self.description
    }
}

/// Where and how check commands run.
#[derive(Debug, Clone, Copy)]
pub struct CheckEnv<'a> {
    /// Variables for `${...}` in check fields
    pub context: &'a InterpolationContext,

    /// Base for relative `file_exists` paths
    pub base_dir: &'a Path,

    /// Shell for `command_succeeds`
    pub shell: &'a str,
}

/// Run a completed check.
pub fn run_check(check: &CompletedCheck, env: CheckEnv<'_>) -> CheckResult {
    match check {
        CompletedCheck::FileExists { path } => match resolve_string(path, env.context) {
            Ok(path) => check_file_exists(&path, env.base_dir),
            Err(e) => CheckResult::incomplete(format!("File missing: {}", path), e.to_string()),
        },
        CompletedCheck::CommandSucceeds { command } => match resolve_string(command, env.context) {
            Ok(command) => check_command_succeeds(&command, env),
            Err(e) => {
                CheckResult::incomplete(format!("Command failed: {}", command), e.to_string())
            }
        },
        CompletedCheck::All { checks } => check_all(checks, env),
        CompletedCheck::Any { checks } => check_any(checks, env),
    }
}

/// Check if a file or directory exists.
fn check_file_exists(path: &str, base_dir: &Path) -> CheckResult {
    let full_path = base_dir.join(path);

    if full_path.exists() {
        CheckResult::complete(format!("File exists: {}", path))
    } else {
        CheckResult::incomplete(
            format!("File missing: {}", path),
            format!("Expected at: {}", full_path.display()),
        )
    }
}

/// Check if a command succeeds (exit code 0).
fn check_command_succeeds(command: &str, env: CheckEnv<'_>) -> CheckResult {
    let options = CommandOptions {
        shell: env.shell.to_string(),
        cwd: Some(env.base_dir.to_path_buf()),
        ..Default::default()
    };

    if execute_check(command, &options) {
        CheckResult::complete(format!("Command succeeded: {}", truncate(command, 50)))
    } else {
        CheckResult::incomplete(
            format!("Command failed: {}", truncate(command, 50)),
            "Exit code was non-zero".to_string(),
        )
    }
}

/// All checks must pass.
fn check_all(checks: &[CompletedCheck], env: CheckEnv<'_>) -> CheckResult {
    let results: Vec<_> = checks.iter().map(|c| run_check(c, env)).collect();

    if results.iter().all(|r| r.complete) {
        CheckResult::complete(format!("All {} checks passed", checks.len()))
    } else {
        let failed: Vec<_> = results
            .iter()
            .filter(|r| !r.complete)
            .map(|r| r.description.clone())
            .collect();

        CheckResult::incomplete(
            format!("{}/{} checks failed", failed.len(), checks.len()),
            failed.join("; "),
        )
    }
}

/// Any check passing is sufficient.
fn check_any(checks: &[CompletedCheck], env: CheckEnv<'_>) -> CheckResult {
    let results: Vec<_> = checks.iter().map(|c| run_check(c, env)).collect();

    if let Some(passed) = results.iter().find(|r| r.complete) {
        CheckResult::complete(format!("Check passed: {}", passed.description))
    } else {
        CheckResult::incomplete(
            format!("None of {} checks passed", checks.len()),
            results
                .iter()
                .map(|r| r.description.clone())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
