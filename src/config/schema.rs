//! Step file schema definitions.
//!
//! This module contains the struct definitions that map to the YAML step
//! file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root structure of a `rigger.yml` step file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiggerConfig {
    /// Display name for the machine or profile being provisioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Global settings
    pub settings: Settings,

    /// Variables available to `${...}` interpolation
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,

    /// Steps, in execution order
    pub steps: Vec<StepConfig>,
}

impl RiggerConfig {
    /// Look up a step by name.
    pub fn step(&self, name: &str) -> Option<&StepConfig> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Display name, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("provisioning")
    }
}

/// Settings that apply to every step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Criticality of steps that don't set `critical:` themselves
    #[serde(skip_serializing_if = "is_false")]
    pub critical_by_default: bool,

    /// Program used to run privileged steps
    #[serde(default = "default_escalate")]
    pub escalate: String,

    /// Shell used to run step commands
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            critical_by_default: false,
            escalate: default_escalate(),
            shell: default_shell(),
        }
    }
}

fn default_escalate() -> String {
    "sudo".to_string()
}

fn default_shell() -> String {
    "sh".to_string()
}

fn is_false(v: &bool) -> bool {
    !v
}

/// A single provisioning step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Unique step name, shown in the confirmation prompt
    pub name: String,

    /// One-line description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shell command to run
    pub command: String,

    /// Abort the whole run if this step fails (defaults to
    /// `settings.critical_by_default`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,

    /// Run the command with elevated privileges
    #[serde(skip_serializing_if = "is_false")]
    pub privileged: bool,

    /// File with one item per line; the command runs once per item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<PathBuf>,

    /// Working directory for the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Environment variables passed to the command
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Check that reports whether the step's work is already done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CompletedCheck>,
}

impl StepConfig {
    /// Effective criticality given the file-wide default.
    pub fn is_critical(&self, settings: &Settings) -> bool {
        self.critical.unwrap_or(settings.critical_by_default)
    }
}

/// Check to determine if a step has already been completed.
///
/// A step whose check passes is not offered at all, which keeps re-runs of
/// the whole file cheap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompletedCheck {
    /// Check if a file or directory exists
    FileExists {
        /// Path to check (relative to the step file's directory)
        path: String,
    },

    /// Check if a command succeeds (exit code 0)
    CommandSucceeds {
        /// Command to run
        command: String,
    },

    /// All checks must pass
    All {
        /// List of checks that must all pass
        checks: Vec<CompletedCheck>,
    },

    /// Any check passing is sufficient
    Any {
        /// List of checks where at least one must pass
        checks: Vec<CompletedCheck>,
    },
}

impl CompletedCheck {
    /// Every interpolatable string inside this check.
    pub fn templates(&self) -> Vec<&str> {
        match self {
            Self::FileExists { path } => vec![path.as_str()],
            Self::CommandSucceeds { command } => vec![command.as_str()],
            Self::All { checks } | Self::Any { checks } => {
                checks.iter().flat_map(|c| c.templates()).collect()
            }
        }
    }
}
