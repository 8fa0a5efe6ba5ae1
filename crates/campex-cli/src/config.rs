//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`ExportSettings`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `CAMPEX_<SECTION>__<KEY>`, e.g.
//!    `CAMPEX_TOOLCHAIN__PROGRAM=pnpm`
//! 3. Config file (`--config`, else `./.campex.toml`, else the platform path)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use campex_adapters::DEFAULT_STDERR_LIMIT;
use campex_core::application::{CopierSettings, ExportSettings};

/// File name of a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = ".campex.toml";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "CAMPEX";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where campaign template sources live and how imports resolve.
    pub source: SourceConfig,
    /// Theme fragment store.
    pub fragments: FragmentsConfig,
    /// External build toolchain.
    pub toolchain: ToolchainConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub root: PathBuf,
    pub sections_dir: PathBuf,
    pub section_extension: String,
    pub alias: String,
    pub extensions: Vec<String>,
    pub shared_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentsConfig {
    /// Unset means "discover" (see `campex_adapters::discover_fragments_dir`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Name of the fragment loaded from the `base` category.
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    pub program: String,
    pub args: Vec<String>,
    pub stderr_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
    /// Directory for archives when `--out` is not given.
    pub dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ExportSettings::new(".");
        let copier = CopierSettings::default();
        Self {
            source: SourceConfig {
                root: settings.source_root,
                sections_dir: copier.sections_dir,
                section_extension: copier.section_extension,
                alias: settings.alias,
                extensions: settings.extensions,
                shared_files: copier.shared_files,
            },
            fragments: FragmentsConfig {
                dir: None,
                base: settings.base_fragment,
            },
            toolchain: ToolchainConfig {
                program: "npx".into(),
                args: vec!["next".into(), "build".into()],
                stderr_limit: DEFAULT_STDERR_LIMIT,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
                dir: PathBuf::from("."),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `CAMPEX_*`.
    ///
    /// `config_file` is the path passed via `--config`; when given it must
    /// exist.  The default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialise default configuration")?;

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("toolchain.args")
            .with_list_parse_key("source.extensions")
            .with_list_parse_key("source.shared_files");

        let merged = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        merged
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Path of the configuration file in effect when `--config` is absent.
    ///
    /// A `.campex.toml` in the current directory wins over the platform
    /// location from `directories::ProjectDirs`.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local;
        }
        Self::global_config_path()
    }

    /// Platform configuration file, falling back to the local file name.
    pub fn global_config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "campex", "campex")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Settings for the export service, with an optional `--source-root`.
    pub fn export_settings(&self, source_root: Option<&Path>) -> ExportSettings {
        let root = source_root.map_or_else(|| self.source.root.clone(), Path::to_path_buf);
        ExportSettings {
            source_root: root,
            alias: self.source.alias.clone(),
            extensions: self.source.extensions.clone(),
            base_fragment: self.fragments.base.clone(),
            copier: CopierSettings {
                sections_dir: self.source.sections_dir.clone(),
                section_extension: self.source.section_extension.clone(),
                shared_files: self.source.shared_files.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toolchain_is_next_build() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.toolchain.program, "npx");
        assert_eq!(cfg.toolchain.args, vec!["next", "build"]);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn defaults_match_core_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.export_settings(Some(Path::new("."))), ExportSettings::new("."));
    }

    #[test]
    fn missing_optional_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.fragments.base, "default");
        assert_eq!(cfg.source.alias, "@/");
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campex.toml");
        std::fs::write(
            &path,
            "[toolchain]\nprogram = \"pnpm\"\nargs = [\"run\", \"build\"]\n\n\
             [fragments]\ndir = \"/srv/fragments\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(cfg.toolchain.program, "pnpm");
        assert_eq!(cfg.toolchain.args, vec!["run", "build"]);
        assert_eq!(cfg.fragments.dir, Some(PathBuf::from("/srv/fragments")));
        // untouched sections keep their defaults
        assert_eq!(cfg.fragments.base, "default");
        assert_eq!(cfg.source.extensions, vec!["tsx", "ts"]);
    }

    #[test]
    fn source_root_flag_wins() {
        let cfg = AppConfig::default();
        let settings = cfg.export_settings(Some(Path::new("/work/template")));
        assert_eq!(settings.source_root, PathBuf::from("/work/template"));
        assert_eq!(cfg.export_settings(None).source_root, PathBuf::from("."));
    }

    #[test]
    fn defaults_serialise_to_toml() {
        let toml = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml.contains("[toolchain]"));
        assert!(!toml.contains("dir = \"\""));
    }
}
