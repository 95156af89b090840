//! `size`: generate the size report

use crate::{
    cli::Handler,
    config::{Config, INTEGRATION_ROOT},
    core::bazel::{BazelCommand, BazelRunner},
};
use anyhow::Context;
use clap::ArgMatches;
use tracing::{info, instrument};

/// Builds the optimized size-report targets of the integration tests
#[derive(Debug, Default)]
pub struct SizeReport;

impl SizeReport {
    pub fn command() -> BazelCommand {
        BazelCommand::build()
            .flag("-c")
            .flag("opt")
            .flag("--build_tag_filters=size_report")
            .target(format!("//{INTEGRATION_ROOT}/..."))
    }
}

impl Handler for SizeReport {
    #[instrument(skip_all)]
    fn run(&self, config: &Config, _matches: &ArgMatches) -> anyhow::Result<()> {
        info!("Generating size report...");

        BazelRunner::new(config)
            .execute(&Self::command())
            .context("Failed to generate size report")?;

        info!("Size report generated successfully");
        Ok(())
    }
}
