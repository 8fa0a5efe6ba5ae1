//! Config emitters - one generated file each.
//!
//! Emitters only render text; writing goes through the `Filesystem` port.
//! They share no state, so `emit_all` runs every write concurrently.

mod data_files;
mod package_manifest;
mod static_files;

pub use data_files::{ContentDataFile, StyleSheet, ThemeDataFile};
pub use package_manifest::PackageManifest;
pub use static_files::{BuildToolConfig, EntryPage, StylingConfig};

use futures::future::try_join_all;
use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{AssembledTheme, CampaignDraft, PackageId, RelativePath},
    error::ExportResult,
};

/// Inputs every emitter may draw from.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub draft: &'a CampaignDraft,
    pub package_id: &'a PackageId,
    pub theme: &'a AssembledTheme,
}

/// A generator for one file at a fixed workspace-relative path.
pub trait Emitter: Send + Sync {
    /// Workspace-relative, `/`-separated.
    fn relative_path(&self) -> &'static str;

    fn render(&self, context: &EmitContext<'_>) -> ExportResult<String>;
}

/// Every emitter, in no particular order.
pub fn default_emitters() -> Vec<Box<dyn Emitter>> {
    vec![
        Box::new(BuildToolConfig),
        Box::new(PackageManifest),
        Box::new(StylingConfig),
        Box::new(ThemeDataFile),
        Box::new(ContentDataFile),
        Box::new(StyleSheet),
        Box::new(EntryPage),
    ]
}

/// Render and write one file, creating its parent directories.
pub async fn emit(
    filesystem: &dyn Filesystem,
    emitter: &dyn Emitter,
    context: &EmitContext<'_>,
    workspace: &Path,
) -> ExportResult<RelativePath> {
    let relative = RelativePath::try_new(emitter.relative_path())?;
    let target = relative.under(workspace);
    let content = emitter.render(context)?;

    if let Some(parent) = target.parent() {
        filesystem.create_dir_all(parent).await?;
    }
    filesystem.write_file(&target, &content).await?;

    debug!(file = %relative, bytes = content.len(), "Emitted");
    Ok(relative)
}

/// Run every emitter concurrently. Fails with the first error.
#[instrument(skip_all, fields(emitters = emitters.len(), workspace = %workspace.display()))]
pub async fn emit_all(
    filesystem: &dyn Filesystem,
    emitters: &[Box<dyn Emitter>],
    context: &EmitContext<'_>,
    workspace: &Path,
) -> ExportResult<Vec<RelativePath>> {
    try_join_all(
        emitters
            .iter()
            .map(|emitter| emit(filesystem, emitter.as_ref(), context, workspace)),
    )
    .await
}


#[cfg(test)]
mod tests {
    use super::test_support::{draft, theme};
    use super::*;
    use crate::application::ports::MockFilesystem;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[test]
    fn every_emitter_has_a_distinct_path() {
        let paths: HashSet<_> = default_emitters().iter().map(|e| e.relative_path()).collect();
        assert_eq!(paths.len(), default_emitters().len());
    }

    #[tokio::test]
    async fn emit_all_writes_each_file_once() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let sink = written.clone();
        fs.expect_write_file().returning(move |path, _| {
            sink.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });

        let draft = draft();
        let package_id = draft.package_id();
        let theme = theme();
        let context = EmitContext {
            draft: &draft,
            package_id: &package_id,
            theme: &theme,
        };

        let emitted = emit_all(&fs, &default_emitters(), &context, Path::new("/ws"))
            .await
            .unwrap();

        assert_eq!(emitted.len(), 7);
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 7);
        assert!(written.contains(&PathBuf::from("/ws/content/theme.json")));
        assert!(written.contains(&PathBuf::from("/ws/package.json")));
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .returning(|path, _| Err(crate::error::ExportError::io(path, "disk full")));

        let draft = draft();
        let package_id = draft.package_id();
        let theme = theme();
        let context = EmitContext {
            draft: &draft,
            package_id: &package_id,
            theme: &theme,
        };

        let err = emit_all(&fs, &default_emitters(), &context, Path::new("/ws"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
