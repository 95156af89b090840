//! Subcommand registration
//!
//! A [`CommandRegistry`] is an ordered table of subcommand descriptors. It is
//! built once at startup and then only read while parsing and dispatching.

use crate::{
    config::Config,
    error::{DevError, Result},
};
use clap::ArgMatches;
use tracing::debug;

/// Name reserved by clap for its generated help subcommand
const RESERVED_HELP: &str = "help";

/// Behavior behind a subcommand
pub trait Handler {
    /// Add subcommand-specific arguments to `command`.
    ///
    /// Handlers without options keep the default, which leaves the command
    /// untouched.
    fn declare_options(&self, command: clap::Command) -> clap::Command {
        command
    }

    /// Perform the subcommand's work with the parsed options
    fn run(&self, config: &Config, matches: &ArgMatches) -> anyhow::Result<()>;
}

/// A registered subcommand
pub struct SubcommandDescriptor {
    name: String,
    description: String,
    handler: Box<dyn Handler>,
}

impl SubcommandDescriptor {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text shown for the subcommand
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Handler invoked when this subcommand is selected
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Build the clap command for this subcommand, including the handler's options
    pub fn command(&self) -> clap::Command {
        let command = clap::Command::new(self.name.clone())
            .about(self.description.clone())
            .long_about(self.description.clone());
        self.handler.declare_options(command)
    }
}

impl std::fmt::Debug for SubcommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubcommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered table of subcommands with unique names
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<SubcommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subcommand.
    ///
    /// Fails if `name` is empty, reserved, or already registered.
    pub fn register<H>(
        &mut self,
        name: impl Into<String>,
        handler: H,
        description: impl Into<String>,
    ) -> Result<()>
    where
        H: Handler + 'static,
    {
        let name = name.into();

        if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
            return Err(DevError::invalid_command_name(
                name,
                "names must be non-empty, contain no whitespace and not start with '-'",
            ));
        }
        if name == RESERVED_HELP {
            return Err(DevError::invalid_command_name(
                name,
                "reserved for the built-in help subcommand",
            ));
        }
        if self.get(&name).is_some() {
            return Err(DevError::duplicate_command(name));
        }

        debug!("Registering subcommand: {}", name);
        self.entries.push(SubcommandDescriptor {
            name,
            description: description.into(),
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Look up a subcommand by exact name
    pub fn get(&self, name: &str) -> Option<&SubcommandDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Iterate over descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SubcommandDescriptor> {
        self.entries.iter()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
