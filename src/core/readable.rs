//! `gen`: regenerate readable examples

use crate::{
    cli::Handler,
    config::{Config, READABLE_ROOT},
    core::{
        NameValidator,
        bazel::{BazelCommand, BazelRunner},
        platform::{platforms_arg, selected_platforms, tag_filter},
    },
    error::{DevError, Result},
};
use anyhow::Context;
use clap::{Arg, ArgMatches};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Rebuilds the readable examples whose names match a glob filter
#[derive(Debug)]
pub struct ReadableExamples {
    validator: NameValidator,
}

impl ReadableExamples {
    pub fn new() -> Result<Self> {
        Ok(Self {
            validator: NameValidator::new()?,
        })
    }

    /// Names of example directories under `root` that match `filter` and hold a BUILD file.
    ///
    /// The filter may not leave `root`; directories whose names cannot form a
    /// target label are skipped.
    #[instrument(skip(self, root))]
    pub fn discover(&self, root: &Path, filter: &str) -> Result<Vec<String>> {
        if filter.starts_with('/') || filter.split(['/', '\\']).any(|part| part == "..") {
            return Err(DevError::validation(format!(
                "Invalid example filter '{filter}': must stay inside the readable examples"
            )));
        }
        glob::Pattern::new(filter)
            .map_err(|e| DevError::validation(format!("Invalid example filter '{filter}': {e}")))?;

        let pattern = format!(
            "{}/{}/BUILD",
            glob::Pattern::escape(&root.to_string_lossy()),
            filter
        );
        debug!("Looking for readable examples: {}", pattern);

        let entries = glob::glob(&pattern)
            .map_err(|e| DevError::validation(format!("Invalid example filter '{filter}': {e}")))?;

        let mut names = Vec::new();
        for entry in entries {
            let build_file = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                DevError::file_system("read", path, e.into_error())
            })?;
            let Some(example_dir) = build_file.parent() else {
                continue;
            };
            let Ok(relative) = example_dir.strip_prefix(root) else {
                continue;
            };
            let name = relative.to_string_lossy().replace('\\', "/");
            match self.validator.validate("example name", &name) {
                Ok(()) => names.push(name),
                Err(e) => warn!("Skipping {}: {}", example_dir.display(), e),
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    pub fn command(names: &[String], build_tag_filter: Option<String>) -> BazelCommand {
        names.iter().fold(
            BazelCommand::build().flag_opt(build_tag_filter),
            |command, name| command.target(format!("//{READABLE_ROOT}/{name}:all")),
        )
    }
}

impl Handler for ReadableExamples {
    fn declare_options(&self, command: clap::Command) -> clap::Command {
        command
            .arg(
                Arg::new("filter")
                    .value_name("FILTER")
                    .default_value("*")
                    .help("Glob over example names to regenerate"),
            )
            .arg(platforms_arg())
    }

    #[instrument(skip_all)]
    fn run(&self, config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
        let filter = matches
            .get_one::<String>("filter")
            .map(String::as_str)
            .unwrap_or("*");
        let root = config.readable_dir();

        let names = self
            .discover(&root, filter)
            .with_context(|| format!("Failed to list readable examples in {}", root.display()))?;
        if names.is_empty() {
            anyhow::bail!(
                "No readable examples match '{}' under {}",
                filter,
                root.display()
            );
        }
        info!("Regenerating {} readable example(s)...", names.len());

        let platforms = selected_platforms(matches);
        let command = Self::command(&names, tag_filter("build_tag_filters", &platforms));
        BazelRunner::new(config)
            .execute(&command)
            .context("Failed to regenerate readable examples")?;

        info!("Readable examples regenerated successfully");
        Ok(())
    }
}
