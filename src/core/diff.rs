//! `diff`: compare generated output against the checked-in golden files

use crate::{
    cli::Handler,
    config::{Config, READABLE_ROOT},
    core::{
        NameValidator,
        bazel::{BazelCommand, BazelRunner},
        platform::Platform,
    },
    error::Result,
};
use anyhow::Context;
use clap::{Arg, ArgMatches, builder::EnumValueParser};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Exit status of `diff` when its inputs differ
const DIFF_FOUND: i32 = 1;

/// Builds one readable example and diffs its output with the golden copy
#[derive(Debug)]
pub struct DiffOutput {
    validator: NameValidator,
}

impl DiffOutput {
    pub fn new() -> Result<Self> {
        Ok(Self {
            validator: NameValidator::new()?,
        })
    }

    pub fn command(name: &str) -> BazelCommand {
        BazelCommand::build().target(format!("//{READABLE_ROOT}/{name}:all"))
    }

    /// Golden and freshly generated output directories for `name`
    pub fn output_dirs(config: &Config, name: &str, platform: Platform) -> (PathBuf, PathBuf) {
        let golden = config
            .readable_dir()
            .join(name)
            .join(format!("output_{}", platform.tag()));
        let generated = config.bazel_bin(format!("{READABLE_ROOT}/{name}/readable-{}", platform.tag()));
        (golden, generated)
    }
}

impl Handler for DiffOutput {
    fn declare_options(&self, command: clap::Command) -> clap::Command {
        command
            .arg(
                Arg::new("name")
                    .value_name("NAME")
                    .required(true)
                    .help("Readable example to compare"),
            )
            .arg(
                Arg::new("platform")
                    .long("platform")
                    .short('p')
                    .value_name("PLATFORM")
                    .value_parser(EnumValueParser::<Platform>::new())
                    .default_value("closure")
                    .help("Platform whose output is compared"),
            )
            .arg(
                Arg::new("tool")
                    .long("tool")
                    .value_name("CMD")
                    .default_value("diff")
                    .help("Diff program to run"),
            )
    }

    #[instrument(skip_all)]
    fn run(&self, config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
        let name = matches
            .get_one::<String>("name")
            .context("Missing example name")?;
        let platform = matches
            .get_one::<Platform>("platform")
            .copied()
            .unwrap_or(Platform::Closure);
        let tool = matches
            .get_one::<String>("tool")
            .map(String::as_str)
            .unwrap_or("diff");

        self.validator.validate("example name", name)?;

        let runner = BazelRunner::new(config);
        runner
            .execute(&Self::command(name))
            .with_context(|| format!("Failed to build readable example '{name}'"))?;

        let (golden, generated) = Self::output_dirs(config, name, platform);
        let golden = golden.to_string_lossy().into_owned();
        let generated = generated.to_string_lossy().into_owned();
        info!("Comparing {} output of '{}'", platform.tag(), name);

        match runner.run_tool(tool, &["-r", "-u", golden.as_str(), generated.as_str()]) {
            Ok(()) => info!("No differences found"),
            Err(e) if e.exit_code() == Some(DIFF_FOUND) => {
                warn!("Output of '{}' differs from the golden files", name);
            }
            Err(e) => return Err(e).context("Failed to compare output"),
        }

        Ok(())
    }
}
