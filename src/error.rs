//! Error types for the j2 developer tools
//!
//! Usage errors are kept as `clap::Error` so the binary can print them with
//! the standard usage text and exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the dispatcher and its built-in handlers
#[derive(Error, Debug)]
pub enum DevError {
    /// Bad command line: missing or unknown subcommand, or malformed options
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// A subcommand name was registered twice
    #[error("Subcommand '{name}' is already registered")]
    DuplicateCommand { name: String },

    /// A subcommand name that cannot be registered
    #[error("Invalid subcommand name '{name}': {message}")]
    InvalidCommandName { name: String, message: String },

    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process execution errors
    #[error("Process error: {command} failed")]
    Process {
        command: String,
        exit_code: Option<i32>,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl DevError {
    /// Create a new duplicate registration error
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Create a new invalid subcommand name error
    pub fn invalid_command_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCommandName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new process error
    pub fn process(
        command: impl Into<String>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error is a command-line usage problem
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Exit status reported by a failed external process, if any
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DevError>;
