//! Flags accepted by every `campex` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so
//! `campex export draft.json -vv` and `campex -vv export draft.json` mean the
//! same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log stage progress to stderr; repeat for import and fragment detail.
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        long_help = "Raise the stderr log level. `RUST_LOG` overrides it.
    -v      stage progress (theme, emit, copy, build, package)
    -vv     resolved imports, fragment lookups, toolchain stdout
    -vvv    everything"
    )]
    pub verbose: u8,

    /// Only report errors; JSON documents and `theme` output still print.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain markers instead of ANSI colors (also via `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of `.campex.toml` or the user config.
    #[arg(short, long, global = true, value_name = "FILE", env = "CAMPEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Rendering of command results on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
///
/// `Auto` never survives [`crate::output::OutputManager::new`]; it resolves
/// to `Human` on a terminal and `Plain` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Colored markers and aligned summary fields.
    Human,
    /// The same text without ANSI codes.
    Plain,
    /// Exactly one JSON document; progress text is suppressed.
    Json,
}
