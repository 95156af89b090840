//! Built-in subcommands and dispatch

use crate::{
    cli::{
        args::{Invocation, parse_args},
        registry::CommandRegistry,
    },
    config::Config,
    core::{DiffOutput, IntegrationTest, ReadableExamples, SizeReport, TestAll},
    error::Result,
};
use std::ffi::OsString;
use tracing::{debug, instrument};

/// Registry holding the j2 subcommands, in the order they are listed in help
pub fn builtin_registry() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();

    registry.register("size", SizeReport, "Generate size report.")?;
    registry.register("gen", ReadableExamples::new()?, "Regenerate readable examples.")?;
    registry.register("diff", DiffOutput::new()?, "Compare output.")?;
    registry.register("test", IntegrationTest::new()?, "Run an integration test.")?;
    registry.register("testall", TestAll, "Run all tests.")?;

    debug!("Registered {} subcommands", registry.len());
    Ok(registry)
}

/// Run the handler selected by `invocation`
#[instrument(skip_all, fields(command = invocation.name()))]
pub fn execute_command(config: &Config, invocation: &Invocation<'_>) -> anyhow::Result<()> {
    debug!("Dispatching to '{}'", invocation.name());
    invocation
        .descriptor()
        .handler()
        .run(config, invocation.matches())
}

/// Parse `raw_arguments`, resolve configuration and run exactly one handler.
///
/// Nothing runs if parsing or configuration fails.
pub fn parse_and_dispatch<I, T>(registry: &CommandRegistry, raw_arguments: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let invocation = parse_args(registry, raw_arguments)?;
    let config = Config::from_globals(invocation.globals())?;
    execute_command(&config, &invocation)
}
