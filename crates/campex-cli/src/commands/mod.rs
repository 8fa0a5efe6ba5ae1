//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and render the results.
//! Adapter wiring shared by `export` and `theme` lives here.

pub mod completions;
pub mod config;
pub mod export;
pub mod init;
pub mod theme;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use campex_adapters::{
    DirectoryFragmentStore, JsonSchemaValidator, LocalFilesystem, ProcessBuildRunner, ZipArchiver,
    discover_fragments_dir,
};
use campex_core::{
    application::{ExportPorts, ExportService},
    domain::CampaignDraft,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Read and parse a draft document.
pub(crate) async fn load_draft(path: &Path) -> CliResult<CampaignDraft> {
    if !path.is_file() {
        return Err(CliError::DraftNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = tokio::fs::read_to_string(path)
        .await
        .with_cli_context(|| format!("Failed to read draft '{}'", path.display()))?;

    serde_json::from_str(&text).map_err(|source| CliError::InvalidDraft {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the fragment directory: flag, then config, then discovery.
pub(crate) fn resolve_fragments_dir(
    flag: Option<&Path>,
    config: &AppConfig,
) -> CliResult<PathBuf> {
    let dir = flag
        .map(Path::to_path_buf)
        .or_else(|| config.fragments.dir.clone())
        .or_else(discover_fragments_dir)
        .ok_or(CliError::FragmentsNotFound)?;

    if !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("fragment directory '{}' does not exist", dir.display()),
            source: None,
        });
    }
    debug!(path = %dir.display(), "Using fragment directory");
    Ok(dir)
}

/// Wire the local adapters into an [`ExportService`].
pub(crate) fn build_service(
    config: &AppConfig,
    source_root: Option<&Path>,
    fragments_dir: PathBuf,
) -> CliResult<ExportService> {
    let schema = JsonSchemaValidator::builtin()?;
    let builder = ProcessBuildRunner::new(
        config.toolchain.program.clone(),
        config.toolchain.args.clone(),
    )
    .with_stderr_limit(config.toolchain.stderr_limit);

    let ports = ExportPorts {
        filesystem: Arc::new(LocalFilesystem::new()),
        fragments: Arc::new(DirectoryFragmentStore::new(fragments_dir)),
        schema: Arc::new(schema),
        builder: Arc::new(builder),
        archiver: Arc::new(ZipArchiver::new()),
    };
    Ok(ExportService::new(ports, config.export_settings(source_root)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_draft_is_not_found() {
        let err = load_draft(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::DraftNotFound { .. }));
    }

    #[tokio::test]
    async fn malformed_draft_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, r#"{ "layoutConfig": [] }"#).unwrap();

        let err = load_draft(&path).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidDraft { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn draft_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{ "variantName": "Spring", "layoutConfig": [ { "name": "Hero" } ] }"#,
        )
        .unwrap();

        let draft = load_draft(&path).await.unwrap();
        assert_eq!(draft.variant_name, "Spring");
        assert_eq!(draft.layout_config.len(), 1);
    }

    #[test]
    fn fragments_flag_wins_over_config() {
        let flag = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.fragments.dir = Some(PathBuf::from("/nowhere"));

        let dir = resolve_fragments_dir(Some(flag.path()), &config).unwrap();
        assert_eq!(dir, flag.path());
    }

    #[test]
    fn nonexistent_fragments_dir_is_rejected() {
        let mut config = AppConfig::default();
        config.fragments.dir = Some(PathBuf::from("/nowhere/fragments"));
        assert!(matches!(
            resolve_fragments_dir(None, &config),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
