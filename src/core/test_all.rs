//! `testall`: run the whole test suite

use crate::{
    cli::Handler,
    config::{ALL_TESTS_PATTERN, Config},
    core::{
        bazel::{BazelCommand, BazelRunner},
        platform::{Platform, platforms_arg, selected_platforms, tag_filter},
    },
};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches};
use tracing::{info, instrument};

#[derive(Debug, Default)]
pub struct TestAll;

impl TestAll {
    pub fn command(platforms: &[Platform], keep_going: bool) -> BazelCommand {
        let command = if keep_going {
            BazelCommand::test().flag("--keep_going")
        } else {
            BazelCommand::test()
        };
        command
            .flag_opt(tag_filter("test_tag_filters", platforms))
            .target(ALL_TESTS_PATTERN)
    }
}

impl Handler for TestAll {
    fn declare_options(&self, command: clap::Command) -> clap::Command {
        command.arg(platforms_arg()).arg(
            Arg::new("keep_going")
                .long("keep-going")
                .action(ArgAction::SetTrue)
                .help("Continue past failing targets"),
        )
    }

    #[instrument(skip_all)]
    fn run(&self, config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
        info!("Running all tests...");

        let command = Self::command(&selected_platforms(matches), matches.get_flag("keep_going"));
        BazelRunner::new(config)
            .execute(&command)
            .context("Test suite failed")?;

        info!("All tests passed");
        Ok(())
    }
}
