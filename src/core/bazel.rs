//! Build tool invocations
//!
//! Handlers describe what to build or test as a [`BazelCommand`]; the
//! [`BazelRunner`] either prints it (dry run) or runs it in the workspace.

use crate::{
    config::{BAZEL_ENV, Config},
    error::{DevError, Result},
    utils::process::{ProcessRunner, format_command},
};
use tracing::{debug, instrument};

/// Bazel verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BazelVerb {
    Build,
    Test,
}

impl BazelVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Test => "test",
        }
    }
}

/// A single build tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazelCommand {
    verb: BazelVerb,
    flags: Vec<String>,
    targets: Vec<String>,
}

impl BazelCommand {
    pub fn new(verb: BazelVerb) -> Self {
        Self {
            verb,
            flags: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn build() -> Self {
        Self::new(BazelVerb::Build)
    }

    pub fn test() -> Self {
        Self::new(BazelVerb::Test)
    }

    /// Add a flag, placed before the targets
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Add a flag if present
    #[must_use]
    pub fn flag_opt(self, flag: Option<String>) -> Self {
        match flag {
            Some(flag) => self.flag(flag),
            None => self,
        }
    }

    /// Add a target pattern
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn verb(&self) -> BazelVerb {
        self.verb
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Argument vector: verb, flags, then targets
    pub fn args(&self) -> Vec<String> {
        std::iter::once(self.verb.as_str().to_string())
            .chain(self.flags.iter().cloned())
            .chain(self.targets.iter().cloned())
            .collect()
    }
}

/// Runs build tool and helper commands according to the configuration
#[derive(Debug)]
pub struct BazelRunner<'a> {
    config: &'a Config,
    runner: ProcessRunner,
}

impl<'a> BazelRunner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            runner: ProcessRunner::new(config.debug),
        }
    }

    /// Run a bazel command in the workspace
    #[instrument(skip(self))]
    pub fn execute(&self, command: &BazelCommand) -> Result<()> {
        if command.targets().is_empty() {
            return Err(DevError::validation(format!(
                "bazel {} needs at least one target",
                command.verb().as_str()
            )));
        }

        let bazel = self.config.bazel.as_str();
        if !self.config.dry_run && !self.runner.command_exists(bazel) {
            return Err(DevError::config(format!(
                "Build tool '{bazel}' not found; install it or set {BAZEL_ENV}"
            )));
        }

        self.run_tool(bazel, command.args().as_slice())
    }

    /// Run an arbitrary tool in the workspace, honoring dry-run mode
    pub fn run_tool<S: AsRef<str>>(&self, tool: &str, args: &[S]) -> Result<()> {
        if self.config.dry_run {
            println!("+ {}", format_command(tool, args));
            return Ok(());
        }

        debug!("Workspace: {}", self.config.workspace.display());
        self.runner.run_command_in(&self.config.workspace, tool, args)
    }
}
