//! Output management and formatting.
//!
//! Everything meant for the user goes through [`OutputManager`]; logs go to
//! stderr through `tracing` instead.

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::ValueEnum;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag beats `output.format`; unknown config values mean Auto.
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };
        // Auto → Human on a TTY, Plain when piped or redirected.
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Raw command result (CSS, config values).  Not suppressed by `--quiet`.
    pub fn payload(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)?;
        if !text.ends_with('\n') {
            self.term.write_line("")?;
        }
        Ok(())
    }

    /// Serialise `value` as one pretty JSON document on stdout.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Aligned `  label  value` line used in summaries.
    pub fn field(&self, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let label = format!("{label:<12}");
        let line = if self.no_color {
            format!("  {label} {value}")
        } else {
            format!("  {} {value}", label.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Spinner on stderr for long stages.  Hidden unless interactive.
    pub fn spinner(&self, msg: impl Into<String>) -> ProgressBar {
        if self.is_silent()
            || self.resolved_format != OutputFormat::Human
            || !io::stderr().is_terminal()
        {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    /// JSON mode reserves stdout for the final document.
    fn is_silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
