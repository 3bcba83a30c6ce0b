//! Step file validation rules.
//!
//! This module validates a step file for correctness:
//! - At least one step must be defined
//! - Step names must be unique and safe to pass on a command line
//! - Every step needs a command
//! - Every `${var}` must resolve

use crate::config::interpolation::{extract_variables, InterpolationContext};
use crate::config::schema::{RiggerConfig, StepConfig};
use crate::error::{Result, RiggerError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Step name if error is step-specific
    pub step: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, step: Option<&str>, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            step: step.map(str::to_string),
        }
    }
}

// Step names end up as arguments on the escalation command line.
static STEP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap());

/// Validate a step file and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &RiggerConfig, ctx: &InterpolationContext) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.steps.is_empty() {
        errors.push(ValidationError::new(
            "no-steps",
            None,
            "Step file defines no steps".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for step in &config.steps {
        if !seen.insert(step.name.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-step",
                Some(&step.name),
                format!("Step '{}' is defined more than once", step.name),
            ));
        }
        errors.extend(validate_step(step, ctx));
    }

    errors
}

fn validate_step(step: &StepConfig, ctx: &InterpolationContext) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = step.name.as_str();

    if !STEP_NAME.is_match(name) {
        errors.push(ValidationError::new(
            "invalid-name",
            Some(name),
            format!(
                "Step name '{}' must start with a letter or digit and contain only letters, digits, '_', '.' or '-'",
                name
            ),
        ));
    }

    if step.command.trim().is_empty() {
        errors.push(ValidationError::new(
            "missing-command",
            Some(name),
            format!("Step '{}' has no command", name),
        ));
    }

    let with_item = step.items.is_some();
    let mut templates: Vec<&str> = vec![step.command.as_str()];
    templates.extend(step.cwd.as_deref());
    templates.extend(step.env.values().map(String::as_str));
    if let Some(check) = &step.check {
        templates.extend(check.templates());
    }

    let mut unknown: Vec<String> = templates
        .into_iter()
        .flat_map(extract_variables)
        .filter(|var| !ctx.knows(var, with_item))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    unknown.sort();

    for var in unknown {
        errors.push(ValidationError::new(
            "unknown-variable",
            Some(name),
            format!("Step '{}' uses undefined variable ${{{}}}", name, var),
        ));
    }

    errors
}

/// Validate and return Result.
pub fn validate(config: &RiggerConfig, ctx: &InterpolationContext) -> Result<()> {
    let errors = validate_config(config, ctx);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(RiggerError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CompletedCheck;
    use std::path::PathBuf;

    fn step(name: &str, command: &str) -> StepConfig {
        StepConfig {
            name: name.to_string(),
            command: command.to_string(),
            ..Default::default()
        }
    }

    fn config(steps: Vec<StepConfig>) -> RiggerConfig {
        RiggerConfig {
            steps,
            ..Default::default()
        }
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.rule.as_str()).collect()
    }

    #[test]
    fn accepts_valid_file() {
        let cfg = config(vec![step("mirrors", "reflector"), step("fonts", "fc-cache")]);
        assert!(validate(&cfg, &InterpolationContext::new()).is_ok());
    }

    #[test]
    fn rejects_empty_file() {
        let errors = validate_config(&config(vec![]), &InterpolationContext::new());
        assert_eq!(rules(&errors), ["no-steps"]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let cfg = config(vec![step("a", "true"), step("a", "true")]);
        let errors = validate_config(&cfg, &InterpolationContext::new());
        assert_eq!(rules(&errors), ["duplicate-step"]);
    }

    #[test]
    fn rejects_unsafe_names() {
        let cfg = config(vec![step("rm -rf", "true"), step("-flag", "true")]);
        let errors = validate_config(&cfg, &InterpolationContext::new());
        assert_eq!(rules(&errors), ["invalid-name", "invalid-name"]);
    }

    #[test]
    fn rejects_blank_command() {
        let cfg = config(vec![step("a", "   ")]);
        let errors = validate_config(&cfg, &InterpolationContext::new());
        assert_eq!(rules(&errors), ["missing-command"]);
    }

    #[test]
    fn reports_unknown_variables_once() {
        let mut s = step("restore", "cp ${backup}/a ${backup}/b");
        s.check = Some(CompletedCheck::FileExists {
            path: "${target}".to_string(),
        });
        let errors = validate_config(&config(vec![s]), &InterpolationContext::new());
        assert_eq!(rules(&errors), ["unknown-variable", "unknown-variable"]);
        assert!(errors[0].message.contains("${backup}"));
        assert!(errors[1].message.contains("${target}"));
    }

    #[test]
    fn item_requires_items_file() {
        let cfg = config(vec![step("pkgs", "pacman -S ${item}")]);
        assert!(validate(&cfg, &InterpolationContext::new()).is_err());

        let mut with_items = step("pkgs", "pacman -S ${item}");
        with_items.items = Some(PathBuf::from("packages.txt"));
        assert!(validate(&config(vec![with_items]), &InterpolationContext::new()).is_ok());
    }

    #[test]
    fn joins_messages() {
        let cfg = config(vec![step("a", ""), step("a", "")]);
        let err = validate(&cfg, &InterpolationContext::new()).unwrap_err();
        assert!(err.to_string().contains("; "));
    }
}
