//! Step file loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use rigger::config::LoadedConfig;
//! use std::collections::HashMap;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("rigger.yml");
//! std::fs::write(&path, "steps:\n  - name: hello\n    command: echo hi\n").unwrap();
//!
//! let loaded = LoadedConfig::load(&path, HashMap::new()).unwrap();
//! assert_eq!(loaded.config.steps[0].name, "hello");
//! ```

pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use interpolation::{parse_overrides, resolve_string, InterpolationContext};
pub use loader::{load_config_file, parse_config, ConfigPaths, LoadedConfig, STEP_FILE_NAME};
pub use schema::{CompletedCheck, RiggerConfig, Settings, StepConfig};
pub use validator::{validate, validate_config, ValidationError};
