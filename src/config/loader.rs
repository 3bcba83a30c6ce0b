//! Step file discovery and loading.
//!
//! A run uses exactly one step file. It is looked up in this order:
//! 1. `--config <path>` (or `RIGGER_CONFIG`)
//! 2. `./rigger.yml` in the working directory
//! 3. `<user config dir>/rigger/rigger.yml`

use crate::config::interpolation::InterpolationContext;
use crate::config::schema::RiggerConfig;
use crate::config::validator::validate;
use crate::error::{Result, RiggerError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config dir.
pub const STEP_FILE_NAME: &str = "rigger.yml";

/// Candidate step file locations in priority order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Explicitly requested file
    pub explicit: Option<PathBuf>,

    /// `rigger.yml` in the working directory
    pub local: PathBuf,

    /// `rigger/rigger.yml` under the user's config directory
    pub user: Option<PathBuf>,
}

impl ConfigPaths {
    /// Build the candidate list for a working directory.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Self {
        Self {
            explicit: explicit.map(|p| cwd.join(p)),
            local: cwd.join(STEP_FILE_NAME),
            user: dirs::config_dir().map(|d| d.join("rigger").join(STEP_FILE_NAME)),
        }
    }

    /// Pick the step file to use.
    ///
    /// An explicit path is returned even when missing so the error names it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` naming the local path when nothing exists.
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Ok(explicit.clone());
        }
        if self.local.is_file() {
            return Ok(self.local.clone());
        }
        if let Some(user) = self.user.as_ref().filter(|p| p.is_file()) {
            return Ok(user.clone());
        }
        Err(RiggerError::ConfigNotFound {
            path: self.local.clone(),
        })
    }
}

/// Load a single step file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RiggerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RiggerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RiggerError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a `RiggerConfig`.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RiggerConfig> {
    serde_yaml::from_str(content).map_err(|e| RiggerError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A parsed and validated step file plus everything needed to run it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Absolute path of the step file
    pub path: PathBuf,

    /// Directory containing the step file; relative paths resolve here
    pub base_dir: PathBuf,

    /// Parsed step file
    pub config: RiggerConfig,

    /// Interpolation context built from vars, overrides and builtins
    pub context: InterpolationContext,
}

impl LoadedConfig {
    /// Load, interpolate-check and validate the step file at `path`.
    pub fn load(path: &Path, overrides: HashMap<String, String>) -> Result<Self> {
        let config = load_config_file(path)?;
        let path = fs::canonicalize(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let context = InterpolationContext::new()
            .with_config_dir(&base_dir)
            .with_vars(config.vars.clone())
            .with_overrides(overrides);

        validate(&config, &context)?;
        tracing::debug!(path = %path.display(), steps = config.steps.len(), "Loaded step file");

        Ok(Self {
            path,
            base_dir,
            config,
            context,
        })
    }

    /// Discover and load the step file for a working directory.
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
        overrides: HashMap<String, String>,
    ) -> Result<Self> {
        let path = ConfigPaths::discover(explicit, cwd).resolve()?;
        Self::load(&path, overrides)
    }

    /// Resolve a possibly relative path against the step file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"
name: desktop
vars:
  backup: /mnt/usb
steps:
  - name: restore
    command: cp -r ${backup}/dots ${home}
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_prefers_explicit_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), STEP_FILE_NAME, SIMPLE);
        let paths = ConfigPaths::discover(Some(Path::new("other.yml")), temp.path());
        assert_eq!(paths.resolve().unwrap(), temp.path().join("other.yml"));
    }

    #[test]
    fn discover_finds_local_file() {
        let temp = TempDir::new().unwrap();
        let local = write(temp.path(), STEP_FILE_NAME, SIMPLE);
        let paths = ConfigPaths::discover(None, temp.path());
        assert_eq!(paths.resolve().unwrap(), local);
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = LoadedConfig::discover(Some(Path::new("nope.yml")), temp.path(), HashMap::new())
            .unwrap_err();
        assert!(matches!(err, RiggerError::ConfigNotFound { path } if path.ends_with("nope.yml")));
    }

    #[test]
    fn load_builds_context() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "steps.yml", SIMPLE);
        let loaded = LoadedConfig::load(&path, HashMap::new()).unwrap();

        assert_eq!(loaded.config.display_name(), "desktop");
        assert_eq!(loaded.context.resolve("backup").unwrap(), "/mnt/usb");
        assert_eq!(
            loaded.context.resolve("config_dir").unwrap(),
            loaded.base_dir.display().to_string()
        );
        assert!(loaded.path.is_absolute());
    }

    #[test]
    fn load_rejects_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "bad.yml", "steps: [unclosed");
        let err = LoadedConfig::load(&path, HashMap::new()).unwrap_err();
        assert!(matches!(err, RiggerError::ConfigParseError { .. }));
    }

    #[test]
    fn load_runs_validation() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "steps.yml",
            "steps:\n  - name: a\n    command: echo ${missing}\n",
        );
        let err = LoadedConfig::load(&path, HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("${missing}"));
    }

    #[test]
    fn overrides_satisfy_validation() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "steps.yml",
            "steps:\n  - name: a\n    command: echo ${target}\n",
        );
        let mut overrides = HashMap::new();
        overrides.insert("target".to_string(), "x".to_string());
        assert!(LoadedConfig::load(&path, overrides).is_ok());
    }

    #[test]
    fn resolve_path_is_relative_to_step_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "steps.yml", SIMPLE);
        let loaded = LoadedConfig::load(&path, HashMap::new()).unwrap();
        assert_eq!(
            loaded.resolve_path(Path::new("packages.txt")),
            loaded.base_dir.join("packages.txt")
        );
        assert_eq!(
            loaded.resolve_path(Path::new("/etc/pkgs")),
            PathBuf::from("/etc/pkgs")
        );
    }
}
