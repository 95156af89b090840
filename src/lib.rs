//! # j2
//!
//! Entry point for various tools useful for J2CL development.
//!
//! Subcommands are registered in a [`cli::CommandRegistry`]; each one is
//! backed by a [`cli::Handler`] that may declare its own options. The first
//! argument selects the subcommand and the rest are parsed with that
//! subcommand's grammar before its handler runs.
//!
//! ## Example
//!
//! ```no_run
//! use j2_dev::cli::{builtin_registry, parse_and_dispatch};
//!
//! let registry = builtin_registry()?;
//! parse_and_dispatch(&registry, ["--dry-run", "test", "jsasync"])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
