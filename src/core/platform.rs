//! Backend platform selection shared by several subcommands

use clap::{Arg, ArgAction, ArgMatches, ValueEnum, builder::EnumValueParser};

/// Backend a test or example is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Platform {
    Closure,
    Wasm,
    J2kt,
}

impl Platform {
    /// Tag used on build targets for this platform
    pub fn tag(self) -> &'static str {
        match self {
            Self::Closure => "closure",
            Self::Wasm => "wasm",
            Self::J2kt => "j2kt",
        }
    }
}

/// `--platform` that may be repeated; absent means every platform
pub fn platforms_arg() -> Arg {
    Arg::new("platform")
        .long("platform")
        .short('p')
        .value_name("PLATFORM")
        .action(ArgAction::Append)
        .value_parser(EnumValueParser::<Platform>::new())
        .help("Restrict to the given platform (repeatable)")
}

/// Platforms selected with [`platforms_arg`], deduplicated in command-line order
pub fn selected_platforms(matches: &ArgMatches) -> Vec<Platform> {
    let mut platforms = Vec::new();
    for platform in matches
        .get_many::<Platform>("platform")
        .into_iter()
        .flatten()
        .copied()
    {
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    platforms
}

/// Render a bazel tag filter flag such as `--test_tag_filters=wasm,j2kt`
pub fn tag_filter(flag: &str, platforms: &[Platform]) -> Option<String> {
    if platforms.is_empty() {
        return None;
    }
    let tags = platforms
        .iter()
        .map(|platform| platform.tag())
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("--{flag}={tags}"))
}
