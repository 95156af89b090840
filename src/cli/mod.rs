//! Command-line interface module
//!
//! Provides subcommand registration, argument parsing and dispatch.

pub mod args;
pub mod commands;
pub mod registry;

pub use args::{GlobalOptions, Invocation, parse_args};
pub use commands::{builtin_registry, execute_command, parse_and_dispatch};
pub use registry::{CommandRegistry, Handler, SubcommandDescriptor};
