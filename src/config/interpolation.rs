//! Variable interpolation for step commands.
//!
//! Step commands, working directories, env values and check fields may use
//! `${variable}` syntax. Values come from the step file's `vars:` map,
//! `--var` overrides, and a small set of builtins. The process environment
//! is deliberately not consulted.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - `$$` not followed by `{` is left alone (the shell's pid)

use crate::error::{Result, RiggerError};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    // Shell `$$` (pid) passes through unchanged.
                    current_literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Context for variable resolution.
///
/// Resolution order: overrides > item > vars > builtins.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    /// Values from `--var KEY=VALUE`
    pub overrides: HashMap<String, String>,

    /// The current item when a step iterates over an items file
    pub item: Option<String>,

    /// The step file's `vars:` map
    pub vars: BTreeMap<String, String>,

    /// Built-in variables (home, config_dir, rigger_version)
    pub builtins: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a new context with built-in variables.
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(
            "rigger_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        if let Some(home) = dirs::home_dir() {
            builtins.insert("home".to_string(), home.display().to_string());
        }

        Self {
            builtins,
            ..Default::default()
        }
    }

    /// Add the directory holding the step file as `${config_dir}`.
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.builtins
            .insert("config_dir".to_string(), dir.display().to_string());
        self
    }

    /// Set the step file variables.
    pub fn with_vars(mut self, vars: BTreeMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set command-line overrides.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// A copy of this context with `${item}` bound.
    pub fn for_item(&self, item: &str) -> Self {
        Self {
            item: Some(item.to_string()),
            ..self.clone()
        }
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        if name == "item" {
            if let Some(item) = &self.item {
                return Some(item.clone());
            }
        }
        self.vars
            .get(name)
            .or_else(|| self.builtins.get(name))
            .cloned()
    }

    /// Variables an elevated `exec` child must receive as overrides so it
    /// resolves them exactly like this process: the overrides themselves and
    /// the effective value of every builtin except `rigger_version`.
    pub fn forwarded(&self) -> HashMap<String, String> {
        let mut forwarded = self.overrides.clone();
        for name in self.builtins.keys().filter(|n| *n != "rigger_version") {
            if let Some(value) = self.resolve(name) {
                forwarded.entry(name.clone()).or_insert(value);
            }
        }
        forwarded
    }

    /// Whether `name` would resolve, treating `item` as bound when `with_item`.
    pub fn knows(&self, name: &str, with_item: bool) -> bool {
        (with_item && name == "item") || self.resolve(name).is_some()
    }
}

/// Resolve all variables in an interpolated string.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any variable is not found in the context.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| RiggerError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}

/// Parse `KEY=VALUE` pairs from the command line.
pub fn parse_overrides(pairs: &[String]) -> Result<HashMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| RiggerError::ConfigValidationError {
                    message: format!("Expected KEY=VALUE, got '{}'", pair),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> InterpolationContext {
        let mut vars = BTreeMap::new();
        vars.insert("backup".to_string(), "/mnt/usb".to_string());
        InterpolationContext::new().with_vars(vars)
    }

    #[test]
    fn parse_literal_only() {
        let result = parse_interpolation("hello world");
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_interpolation("cp ${backup}/ssh ~");
        assert_eq!(
            result,
            vec![
                Segment::Literal("cp ".to_string()),
                Segment::Variable("backup".to_string()),
                Segment::Literal("/ssh ~".to_string()),
            ]
        );
    }

    #[test]
    fn forwarded_carries_effective_builtins() {
        let mut builtins = HashMap::new();
        builtins.insert("home".to_string(), "/home/me".to_string());
        builtins.insert("config_dir".to_string(), "/etc/rigger".to_string());
        builtins.insert("rigger_version".to_string(), "0.0.0".to_string());
        let mut vars = BTreeMap::new();
        vars.insert("config_dir".to_string(), "/srv/conf".to_string());
        let mut overrides = HashMap::new();
        overrides.insert("backup".to_string(), "/mnt/usb".to_string());

        let ctx = InterpolationContext {
            builtins,
            ..Default::default()
        }
        .with_vars(vars)
        .with_overrides(overrides);

        let forwarded = ctx.forwarded();
        assert_eq!(forwarded.len(), 3);
        assert_eq!(forwarded["home"], "/home/me");
        assert_eq!(forwarded["config_dir"], "/srv/conf");
        assert_eq!(forwarded["backup"], "/mnt/usb");
    }

    #[test]
    fn escaped_variable_is_literal() {
        let result = resolve_string("echo $${HOME} $$1", &ctx()).unwrap();
        assert_eq!(result, "echo ${HOME} $$1");
    }

    #[test]
    fn double_dollar_without_brace_is_kept() {
        let result = resolve_string("echo \"$$\" > pid.txt; kill -0 $$", &ctx()).unwrap();
        assert_eq!(result, "echo \"$$\" > pid.txt; kill -0 $$");
        assert!(extract_variables("echo $$ $${x}").is_empty());
    }

    #[test]
    fn plain_dollar_is_untouched() {
        let result = resolve_string("echo $HOME", &ctx()).unwrap();
        assert_eq!(result, "echo $HOME");
    }

    #[test]
    fn resolves_vars() {
        let result = resolve_string("tar xf ${backup}/dots.tar", &ctx()).unwrap();
        assert_eq!(result, "tar xf /mnt/usb/dots.tar");
    }

    #[test]
    fn overrides_win_over_vars() {
        let mut overrides = HashMap::new();
        overrides.insert("backup".to_string(), "/media/disk".to_string());
        let ctx = ctx().with_overrides(overrides);
        assert_eq!(resolve_string("${backup}", &ctx).unwrap(), "/media/disk");
    }

    #[test]
    fn item_only_resolves_when_bound() {
        let base = ctx();
        assert!(resolve_string("pacman -S ${item}", &base).is_err());
        let bound = base.for_item("neovim");
        assert_eq!(
            resolve_string("pacman -S ${item}", &bound).unwrap(),
            "pacman -S neovim"
        );
        assert!(base.knows("item", true));
        assert!(!base.knows("item", false));
    }

    #[test]
    fn unresolved_variable_errors() {
        let err = resolve_string("${nope}", &ctx()).unwrap_err();
        assert!(err.to_string().contains("${nope}"));
    }

    #[test]
    fn extract_variables_is_unique() {
        let vars = extract_variables("${a} ${b} ${a}");
        assert_eq!(vars.len(), 2);
        assert!(vars.contains("a"));
    }

    #[test]
    fn config_dir_builtin() {
        let ctx = InterpolationContext::new().with_config_dir(Path::new("/etc/rigger"));
        assert_eq!(resolve_string("${config_dir}", &ctx).unwrap(), "/etc/rigger");
    }

    #[test]
    fn parses_override_pairs() {
        let pairs = vec!["backup=/mnt/a=b".to_string(), " user =me".to_string()];
        let map = parse_overrides(&pairs).unwrap();
        assert_eq!(map["backup"], "/mnt/a=b");
        assert_eq!(map["user"], "me");
    }

    #[test]
    fn rejects_malformed_override() {
        assert!(parse_overrides(&["novalue".to_string()]).is_err());
        assert!(parse_overrides(&["=x".to_string()]).is_err());
    }
}
