//! Process execution utilities
//!
//! Provides process execution with proper error handling and logging.

use crate::error::{DevError, Result};
use std::{
    path::Path,
    process::{Command, Stdio},
};
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

/// Render a command line for logs and dry runs
pub fn format_command<S: AsRef<str>>(command: &str, args: &[S]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ")
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command in `dir`, inheriting stdout/stderr
    #[instrument(skip(self, dir, args))]
    pub fn run_command_in<S: AsRef<str>>(&self, dir: &Path, command: &str, args: &[S]) -> Result<()> {
        let cmd_str = format_command(command, args);

        if self.debug {
            debug!("Running command in {}: {}", dir.display(), cmd_str);
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args.iter().map(AsRef::as_ref))
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DevError::Process {
                command: cmd_str.clone(),
                exit_code: None,
                message: format!("Failed to execute command: {e}"),
                source: Some(e),
            })?;

        if !status.success() {
            let exit_code = status.code();
            return Err(DevError::process(
                cmd_str,
                exit_code,
                format!("Command failed with exit code: {exit_code:?}"),
            ));
        }

        debug!("Command completed successfully");
        Ok(())
    }

    /// Check if a command exists in PATH
    #[instrument(skip(self))]
    pub fn command_exists(&self, command: &str) -> bool {
        debug!("Checking if command exists: {}", command);

        let result = Command::new("which")
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(status) => {
                let exists = status.success();
                debug!("Command '{}' exists: {}", command, exists);
                exists
            }
            Err(e) => {
                debug!("Failed to check if command '{}' exists: {}", command, e);
                false
            }
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_runner_creation() {
        let runner = ProcessRunner::new(true);
        assert!(runner.debug);

        let runner = ProcessRunner::default();
        assert!(!runner.debug);
    }

    #[test]
    fn test_format_command() {
        assert_eq!(
            format_command("bazel", &["test", "//transpiler/javatests/..."]),
            "bazel test //transpiler/javatests/..."
        );
        assert_eq!(format_command::<&str>("true", &[]), "true");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_simple_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_command_in(Path::new("."), "echo", &["hello"]);
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_command_in_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker"), "x").unwrap();

        let runner = ProcessRunner::new(true);
        assert!(runner.run_command_in(dir.path(), "test", &["-f", "marker"]).is_ok());
        assert!(runner.run_command_in(Path::new("/"), "test", &["-f", "marker"]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_exists() {
        let runner = ProcessRunner::new(false);

        assert!(runner.command_exists("sh"));
        assert!(!runner.command_exists("nonexistent_command_12345"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_failing_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_command_in(Path::new("."), "false", &[] as &[&str]);

        if let Err(DevError::Process {
            command, exit_code, ..
        }) = result
        {
            assert_eq!(command, "false");
            assert_eq!(exit_code, Some(1));
        } else {
            panic!("Expected ProcessError");
        }
    }

    #[test]
    fn test_missing_binary_is_process_error() {
        let runner = ProcessRunner::new(false);
        let err = runner
            .run_command_in(Path::new("."), "nonexistent_command_12345", &["x"])
            .unwrap_err();
        assert!(matches!(err, DevError::Process { exit_code: None, .. }));
    }
}
