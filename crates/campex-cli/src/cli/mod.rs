//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "campex",
    bin_name = "campex",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Export campaign drafts as packaged static sites",
    long_about = "campex turns a campaign draft into a standalone site project, \
                  builds it with the configured toolchain, and packages the \
                  result as a zip archive.",
    after_help = "EXAMPLES:\n\
        \x20 campex export draft.json --out summer-sale.zip\n\
        \x20 campex export draft.json --dry-run\n\
        \x20 campex theme  draft.json --format css\n\
        \x20 campex completions bash > /usr/share/bash-completion/completions/campex",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export a draft to a packaged archive.
    #[command(
        visible_alias = "x",
        about = "Export a campaign draft",
        after_help = "EXAMPLES:\n\
            \x20 campex export draft.json --out dist/summer.zip\n\
            \x20 campex export draft.json --source-root ../template --fragments ./fragments\n\
            \x20 campex export draft.json --campaign-id 42 --variant-id b\n\
            \x20 campex export draft.json --keep-workspace -vv"
    )]
    Export(ExportArgs),

    /// Assemble and print the theme for a draft.
    #[command(
        about = "Preview the assembled theme",
        after_help = "EXAMPLES:\n\
            \x20 campex theme draft.json\n\
            \x20 campex theme draft.json --format css > theme.css"
    )]
    Theme(ThemeArgs),

    /// Initialise a campex configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 campex init           # default location\n\
            \x20 campex init --local   # .campex.toml in CWD\n\
            \x20 campex init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 campex completions bash > ~/.local/share/bash-completion/completions/campex\n\
            \x20 campex completions zsh  > ~/.zfunc/_campex\n\
            \x20 campex completions fish > ~/.config/fish/completions/campex.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the campex configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 campex config get toolchain.program\n\
            \x20 campex config list\n\
            \x20 campex config path"
    )]
    Config(ConfigCommands),
}

// ── export ────────────────────────────────────────────────────────────────────

/// Arguments for `campex export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Draft document (JSON) produced by the campaign wizard.
    #[arg(value_name = "DRAFT", help = "Path to the campaign draft (JSON)")]
    pub draft: PathBuf,

    /// Archive to write.  Defaults to `<output.dir>/<package>-<timestamp>.zip`.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "ZIP",
        help = "Output archive path"
    )]
    pub out: Option<PathBuf>,

    /// Root of the campaign template sources.
    #[arg(
        short = 's',
        long = "source-root",
        value_name = "DIR",
        help = "Campaign template source root (overrides source.root)"
    )]
    pub source_root: Option<PathBuf>,

    /// Theme fragment directory.
    #[arg(
        short = 'f',
        long = "fragments",
        value_name = "DIR",
        help = "Theme fragment directory (overrides fragments.dir)"
    )]
    pub fragments: Option<PathBuf>,

    /// Force the campaign id passed to the build.
    #[arg(long = "campaign-id", value_name = "ID", help = "Campaign id for the build")]
    pub campaign_id: Option<String>,

    /// Force the variant id passed to the build.
    #[arg(long = "variant-id", value_name = "ID", help = "Variant id for the build")]
    pub variant_id: Option<String>,

    /// Create the workspace under this directory instead of the system temp dir.
    #[arg(
        long = "workspace-dir",
        value_name = "DIR",
        help = "Parent directory for the build workspace"
    )]
    pub workspace_dir: Option<PathBuf>,

    /// Leave the workspace on disk after the run.
    #[arg(long = "keep-workspace", help = "Do not delete the workspace afterwards")]
    pub keep_workspace: bool,

    /// Print what would be generated and copied without writing anything.
    #[arg(long = "dry-run", help = "Show what would be exported without exporting")]
    pub dry_run: bool,

    /// Overwrite an existing archive.
    #[arg(long = "force", help = "Overwrite an existing archive")]
    pub force: bool,
}

// ── theme ─────────────────────────────────────────────────────────────────────

/// Arguments for `campex theme`.
#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Draft document (JSON).
    #[arg(value_name = "DRAFT", help = "Path to the campaign draft (JSON)")]
    pub draft: PathBuf,

    /// Theme fragment directory.
    #[arg(
        short = 'f',
        long = "fragments",
        value_name = "DIR",
        help = "Theme fragment directory (overrides fragments.dir)"
    )]
    pub fragments: Option<PathBuf>,

    /// What to print.
    #[arg(
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: ThemeFormat,
}

/// Output format for the `theme` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeFormat {
    /// The merged theme document.
    Json,
    /// The `:root` block of CSS custom properties.
    Css,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `campex init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.campex.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `campex completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `campex config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `toolchain.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_export_command() {
        let cli = Cli::parse_from([
            "campex",
            "export",
            "draft.json",
            "--out",
            "site.zip",
            "--campaign-id",
            "42",
            "--keep-workspace",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected Export command");
        };
        assert_eq!(args.draft, PathBuf::from("draft.json"));
        assert_eq!(args.out, Some(PathBuf::from("site.zip")));
        assert_eq!(args.campaign_id.as_deref(), Some("42"));
        assert!(args.keep_workspace);
        assert!(!args.dry_run);
    }

    #[test]
    fn export_alias() {
        let cli = Cli::parse_from(["campex", "x", "draft.json", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Export(ExportArgs { dry_run: true, .. })));
    }

    #[test]
    fn theme_format_defaults_to_json() {
        let cli = Cli::parse_from(["campex", "theme", "draft.json"]);
        let Commands::Theme(args) = cli.command else {
            panic!("expected Theme command");
        };
        assert_eq!(args.format, ThemeFormat::Json);

        let cli = Cli::parse_from(["campex", "theme", "draft.json", "--format", "css"]);
        assert!(matches!(
            cli.command,
            Commands::Theme(ThemeArgs { format: ThemeFormat::Css, .. })
        ));
    }

    #[test]
    fn export_requires_draft() {
        assert!(Cli::try_parse_from(["campex", "export"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["campex", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
