//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `campex-core` and
//! `campex-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `--output-format json` switches the stderr layer to JSON lines.
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.  Fails if a
/// global subscriber is already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    // RUST_LOG wins; otherwise every campex crate gets the same level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    // Machine-readable runs get machine-readable logs.
    let result = if args.output_format == OutputFormat::Json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(use_ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Filter directives giving each campex crate the same level.
fn directives(level: &str) -> String {
    ["campex", "campex_core", "campex_adapters"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_levels() {
        let cases = [
            (0, false, "warn"),
            (1, false, "info"),
            (2, false, "debug"),
            (3, false, "trace"),
            (10, false, "trace"),
            (0, true, "error"),
            (3, true, "error"),
        ];
        for (verbose, quiet, expected) in cases {
            assert_eq!(
                derive_level(&args_with(verbose, quiet)),
                expected,
                "verbose={verbose} quiet={quiet}"
            );
        }
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            directives("debug"),
            "campex=debug,campex_core=debug,campex_adapters=debug"
        );
    }
}
