#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use j2_dev::{cli, config::Config, error::DevError, setup_logging};

fn main() -> Result<()> {
    let registry = cli::builtin_registry()?;

    // Usage errors print clap's usage text and exit with status 2
    let invocation = match cli::parse_args(&registry, std::env::args_os().skip(1)) {
        Ok(invocation) => invocation,
        Err(DevError::Usage(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    // Setup logging based on debug flag
    setup_logging(invocation.globals().debug)?;

    // Initialize configuration
    let config = Config::from_globals(invocation.globals())?;

    // Execute the selected subcommand
    cli::execute_command(&config, &invocation)
}
