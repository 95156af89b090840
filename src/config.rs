//! Configuration management for the j2 tools
//!
//! Merges global command-line options with environment variables and
//! provides validation.

use crate::{cli::GlobalOptions, error::DevError, utils::env::EnvUtils};
use std::path::{Path, PathBuf};

/// Environment variable naming the build tool binary
pub const BAZEL_ENV: &str = "J2_BAZEL";
/// Environment variable naming the workspace root
pub const WORKSPACE_ENV: &str = "J2_WORKSPACE";
/// Set by `bazel run` to the workspace the tool was launched from
pub const BUILD_WORKSPACE_ENV: &str = "BUILD_WORKSPACE_DIRECTORY";

/// Readable examples, relative to the workspace root
pub const READABLE_ROOT: &str = "transpiler/javatests/com/google/j2cl/transpiler/readable";
/// Integration tests, relative to the workspace root
pub const INTEGRATION_ROOT: &str = "transpiler/javatests/com/google/j2cl/transpiler/integration";
/// Everything the full test suite covers
pub const ALL_TESTS_PATTERN: &str = "//transpiler/javatests/...";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Print build tool commands instead of running them
    pub dry_run: bool,
    /// Repository root the build tool runs in
    pub workspace: PathBuf,
    /// Build tool binary
    pub bazel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            dry_run: false,
            workspace: PathBuf::from("."),
            bazel: "bazel".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from global options and the environment
    pub fn from_globals(globals: &GlobalOptions) -> Result<Self, DevError> {
        let defaults = Self::default();

        let workspace = globals
            .workspace
            .clone()
            .or_else(|| EnvUtils::get_var(WORKSPACE_ENV).map(PathBuf::from))
            .or_else(|| EnvUtils::get_var(BUILD_WORKSPACE_ENV).map(PathBuf::from))
            .unwrap_or(defaults.workspace);

        let config = Self {
            debug: globals.debug,
            dry_run: globals.dry_run,
            workspace,
            bazel: EnvUtils::get_var_or_default(BAZEL_ENV, &defaults.bazel),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DevError> {
        if self.bazel.trim().is_empty() {
            return Err(DevError::config(format!("{BAZEL_ENV} must not be empty")));
        }

        if !self.workspace.is_dir() {
            return Err(DevError::validation(format!(
                "Workspace directory not found: {}",
                self.workspace.display()
            )));
        }

        Ok(())
    }

    /// Directory holding the readable examples
    pub fn readable_dir(&self) -> PathBuf {
        self.workspace.join(READABLE_ROOT)
    }

    /// Path of a workspace-relative output under `bazel-bin`
    pub fn bazel_bin(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.workspace.join("bazel-bin").join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bazel, "bazel");
    }

    #[test]
    fn test_command_line_workspace_wins() {
        let dir = TempDir::new().unwrap();
        let globals = GlobalOptions {
            debug: true,
            dry_run: true,
            workspace: Some(dir.path().to_path_buf()),
        };

        let config = Config::from_globals(&globals).unwrap();
        assert!(config.debug);
        assert!(config.dry_run);
        assert_eq!(config.workspace, dir.path());
    }

    #[test]
    fn test_missing_workspace_rejected() {
        let globals = GlobalOptions {
            workspace: Some(PathBuf::from("/nonexistent/j2cl/workspace")),
            ..GlobalOptions::default()
        };

        let err = Config::from_globals(&globals).unwrap_err();
        assert!(matches!(err, DevError::Validation { .. }));
    }

    #[test]
    fn test_empty_bazel_rejected() {
        let config = Config {
            bazel: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(DevError::Config { .. })));
    }

    #[test]
    fn test_derived_paths() {
        let config = Config {
            workspace: PathBuf::from("/src/j2cl"),
            ..Config::default()
        };
        assert_eq!(
            config.readable_dir(),
            PathBuf::from("/src/j2cl").join(READABLE_ROOT)
        );
        assert_eq!(
            config.bazel_bin("a/b"),
            PathBuf::from("/src/j2cl/bazel-bin/a/b")
        );
    }
}
