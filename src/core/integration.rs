//! `test`: run one integration test

use crate::{
    cli::Handler,
    config::{Config, INTEGRATION_ROOT},
    core::{
        NameValidator,
        bazel::{BazelCommand, BazelRunner},
        platform::{Platform, platforms_arg, selected_platforms, tag_filter},
    },
    error::Result,
};
use anyhow::Context;
use clap::{Arg, ArgMatches};
use tracing::{info, instrument};

/// Runs the tests of a single integration test package
#[derive(Debug)]
pub struct IntegrationTest {
    validator: NameValidator,
}

impl IntegrationTest {
    pub fn new() -> Result<Self> {
        Ok(Self {
            validator: NameValidator::new()?,
        })
    }

    pub fn command(test_name: &str, platforms: &[Platform]) -> BazelCommand {
        BazelCommand::test()
            .flag_opt(tag_filter("test_tag_filters", platforms))
            .target(format!("//{INTEGRATION_ROOT}/{test_name}/..."))
    }
}

impl Handler for IntegrationTest {
    fn declare_options(&self, command: clap::Command) -> clap::Command {
        command
            .arg(
                Arg::new("test_name")
                    .value_name("TEST_NAME")
                    .required(true)
                    .help("Integration test to run, e.g. jsasync"),
            )
            .arg(platforms_arg())
    }

    #[instrument(skip_all)]
    fn run(&self, config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
        let test_name = matches
            .get_one::<String>("test_name")
            .context("Missing test name")?;
        self.validator.validate("test name", test_name)?;

        info!("Running integration test: {}", test_name);

        let command = Self::command(test_name, &selected_platforms(matches));
        BazelRunner::new(config)
            .execute(&command)
            .with_context(|| format!("Integration test '{test_name}' failed"))?;

        info!("Integration test passed");
        Ok(())
    }
}
