//! Command-line argument parsing
//!
//! The clap command tree is assembled from a [`CommandRegistry`] at runtime:
//! each descriptor contributes a subcommand and its handler declares that
//! subcommand's options.

use crate::{
    cli::registry::{CommandRegistry, SubcommandDescriptor},
    error::Result,
};
use clap::{Arg, ArgAction, ArgMatches, error::ErrorKind, value_parser};
use std::{ffi::OsString, path::PathBuf};
use tracing::{debug, instrument};

/// Program name used in usage and help output
pub const PROGRAM_NAME: &str = "j2";

/// Options accepted before or after any subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Enable debug output
    pub debug: bool,
    /// Print build tool commands instead of running them
    pub dry_run: bool,
    /// Workspace root given on the command line
    pub workspace: Option<PathBuf>,
}

impl GlobalOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            debug: matches.get_flag("debug"),
            dry_run: matches.get_flag("dry-run"),
            workspace: matches.get_one::<PathBuf>("workspace").cloned(),
        }
    }
}

/// Result of parsing one command line against a registry
#[derive(Debug)]
pub struct Invocation<'a> {
    descriptor: &'a SubcommandDescriptor,
    matches: ArgMatches,
    globals: GlobalOptions,
}

impl<'a> Invocation<'a> {
    /// Name of the selected subcommand
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Descriptor of the selected subcommand
    pub fn descriptor(&self) -> &'a SubcommandDescriptor {
        self.descriptor
    }

    /// Options parsed by the subcommand's own grammar
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    pub fn globals(&self) -> &GlobalOptions {
        &self.globals
    }
}

/// Build the top-level clap command with one subcommand per registry entry
pub fn build_command(registry: &CommandRegistry) -> clap::Command {
    let command = clap::Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("j2 dev script.")
        // Unknown names are resolved against the registry so the error can
        // list every valid choice.
        .allow_external_subcommands(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print build tool commands instead of running them"),
        )
        .arg(
            Arg::new("workspace")
                .long("workspace")
                .global(true)
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Repository root the build tool runs in"),
        );

    registry
        .iter()
        .fold(command, |command, descriptor| command.subcommand(descriptor.command()))
}

/// Parse `raw_arguments` (without the program name) into an [`Invocation`].
///
/// Fails with [`crate::error::DevError::Usage`] when no subcommand is given,
/// when the subcommand is not registered, or when its options are malformed.
#[instrument(skip_all)]
pub fn parse_args<'a, I, T>(registry: &'a CommandRegistry, raw_arguments: I) -> Result<Invocation<'a>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = build_command(registry);
    let argv = std::iter::once(OsString::from(PROGRAM_NAME))
        .chain(raw_arguments.into_iter().map(Into::into));

    let mut matches = command.try_get_matches_from_mut(argv)?;

    let Some((name, sub_matches)) = matches.remove_subcommand() else {
        return Err(command
            .error(ErrorKind::MissingSubcommand, "too few arguments")
            .into());
    };

    let Some(descriptor) = registry.get(&name) else {
        let message = invalid_choice_message(&name, registry);
        return Err(command.error(ErrorKind::InvalidSubcommand, message).into());
    };

    let globals = GlobalOptions::from_matches(&sub_matches);
    debug!("Selected subcommand '{}' with {:?}", name, globals);

    Ok(Invocation {
        descriptor,
        matches: sub_matches,
        globals,
    })
}

fn invalid_choice_message(name: &str, registry: &CommandRegistry) -> String {
    if registry.is_empty() {
        return format!("invalid choice: '{name}' (no subcommands are registered)");
    }
    let choices = registry
        .names()
        .iter()
        .map(|choice| format!("'{choice}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("invalid choice: '{name}' (choose from {choices})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::registry::Handler, config::Config, error::DevError};

    struct Plain;

    impl Handler for Plain {
        fn run(&self, _config: &Config, _matches: &ArgMatches) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Diffish;

    impl Handler for Diffish {
        fn declare_options(&self, command: clap::Command) -> clap::Command {
            command
                .arg(Arg::new("tool").long("tool").default_value("diff"))
                .arg(Arg::new("name").required(true))
        }

        fn run(&self, _config: &Config, _matches: &ArgMatches) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register("size", Plain, "Generate size report.").unwrap();
        registry.register("diff", Diffish, "Compare output.").unwrap();
        registry
    }

    fn usage_kind(err: DevError) -> ErrorKind {
        match err {
            DevError::Usage(err) => err.kind(),
            other => panic!("Expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_subcommand_without_options() {
        let registry = registry();
        let invocation = parse_args(&registry, ["size"]).unwrap();
        assert_eq!(invocation.name(), "size");
        assert_eq!(invocation.globals(), &GlobalOptions::default());
    }

    #[test]
    fn test_no_arguments_is_too_few() {
        let registry = registry();
        let err = parse_args(&registry, Vec::<String>::new()).unwrap_err();
        assert!(err.to_string().contains("too few arguments"));
        assert_eq!(usage_kind(err), ErrorKind::MissingSubcommand);
    }

    #[test]
    fn test_unknown_subcommand_lists_choices() {
        let registry = registry();
        let err = parse_args(&registry, ["bogus"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid choice: 'bogus'"));
        assert!(message.contains("'size', 'diff'"));
        assert_eq!(usage_kind(err), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_unknown_subcommand_with_empty_registry() {
        let registry = CommandRegistry::new();
        let err = parse_args(&registry, ["size"]).unwrap_err();
        assert!(err.to_string().contains("no subcommands are registered"));
        assert_eq!(usage_kind(err), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_prefix_does_not_match() {
        let registry = registry();
        let err = parse_args(&registry, ["siz"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_handler_options_are_consumed() {
        let registry = registry();
        let invocation = parse_args(&registry, ["diff", "--tool", "meld", "Foo"]).unwrap();
        assert_eq!(invocation.name(), "diff");
        assert_eq!(
            invocation.matches().get_one::<String>("tool").map(String::as_str),
            Some("meld")
        );
        assert_eq!(
            invocation.matches().get_one::<String>("name").map(String::as_str),
            Some("Foo")
        );
    }

    #[test]
    fn test_handler_option_error_is_not_dispatch_error() {
        let registry = registry();
        let err = parse_args(&registry, ["diff"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::MissingRequiredArgument);

        let err = parse_args(&registry, ["size", "--tool", "x"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_global_flags_before_and_after_subcommand() {
        let registry = registry();

        let invocation = parse_args(&registry, ["--debug", "--dry-run", "size"]).unwrap();
        assert!(invocation.globals().debug);
        assert!(invocation.globals().dry_run);

        let invocation =
            parse_args(&registry, ["size", "--workspace", "/tmp/j2cl", "--debug"]).unwrap();
        assert!(invocation.globals().debug);
        assert!(!invocation.globals().dry_run);
        assert_eq!(
            invocation.globals().workspace,
            Some(PathBuf::from("/tmp/j2cl"))
        );
    }

    #[test]
    fn test_help_is_reported_through_clap() {
        let registry = registry();
        let err = parse_args(&registry, ["--help"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_command_tree_is_consistent() {
        build_command(&registry()).debug_assert();
    }
}
