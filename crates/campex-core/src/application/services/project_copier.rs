//! Project Copier - copies every section and its local dependencies.
//!
//! Traversal is depth-first and sequential: a file's resolvable imports are
//! copied before the file itself, and each source file is visited at most
//! once per `copy_all` call.

use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::dependency_resolver::{DependencyResolver, scan_imports},
    },
    domain::{RelativePath, ResolvedModule, SectionName},
    error::ExportResult,
};

/// Where sections live and which shared files always ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopierSettings {
    /// Section directory, relative to the source root.
    pub sections_dir: PathBuf,
    pub section_extension: String,
    /// Alias specifiers copied whether or not a section imports them.
    pub shared_files: Vec<String>,
}

impl Default for CopierSettings {
    fn default() -> Self {
        Self {
            sections_dir: PathBuf::from("components/sections"),
            section_extension: "tsx".into(),
            shared_files: vec!["@/components/layout/SectionRenderer".into()],
        }
    }
}

/// State of one traversal. Never shared between calls.
#[derive(Debug, Default)]
pub struct CopySession {
    visited: HashSet<PathBuf>,
    order: Vec<PathBuf>,
    destination: Option<PathBuf>,
    written: usize,
}

impl CopySession {
    fn writing(destination: &Path) -> Self {
        Self {
            destination: Some(destination.to_path_buf()),
            ..Self::default()
        }
    }

    fn dry_run() -> Self {
        Self::default()
    }

    /// Source files in the order they were (or would be) copied.
    pub fn order(&self) -> &[PathBuf] {
        &self.order
    }
}

pub struct ProjectCopier {
    filesystem: Arc<dyn Filesystem>,
    resolver: DependencyResolver,
    settings: CopierSettings,
}

impl ProjectCopier {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        resolver: DependencyResolver,
        settings: CopierSettings,
    ) -> Self {
        Self {
            filesystem,
            resolver,
            settings,
        }
    }

    pub fn source_root(&self) -> &Path {
        self.resolver.source_root()
    }

    /// Source file for a section.
    pub fn section_path(&self, name: &SectionName) -> PathBuf {
        self.source_root()
            .join(&self.settings.sections_dir)
            .join(format!("{}.{}", name, self.settings.section_extension))
    }

    /// Copy every section, the shared files, and everything they import into
    /// `workspace`. Returns the number of files written.
    ///
    /// The first read or write error aborts the copy; files already written
    /// stay where they are.
    #[instrument(
        skip(self, sections),
        fields(sections = sections.len(), workspace = %workspace.display())
    )]
    pub async fn copy_all(
        &self,
        sections: &[SectionName],
        workspace: &Path,
    ) -> ExportResult<usize> {
        let mut session = CopySession::writing(workspace);
        self.traverse(&mut session, sections).await?;
        info!(files = session.written, "Project sources copied");
        Ok(session.written)
    }

    /// Run the same traversal without writing anything.
    pub async fn plan(&self, sections: &[SectionName]) -> ExportResult<Vec<PathBuf>> {
        let mut session = CopySession::dry_run();
        self.traverse(&mut session, sections).await?;
        Ok(session.order)
    }

    async fn traverse(
        &self,
        session: &mut CopySession,
        sections: &[SectionName],
    ) -> ExportResult<()> {
        for name in sections {
            self.visit(session, self.section_path(name)).await?;
        }

        for specifier in &self.settings.shared_files {
            if let Some(path) = self.resolver.resolve(specifier, self.source_root()).await {
                self.visit(session, path).await?;
            }
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        session: &'a mut CopySession,
        path: PathBuf,
    ) -> BoxFuture<'a, ExportResult<()>> {
        async move {
            if !session.visited.insert(path.clone()) {
                return Ok(());
            }

            let content = self.filesystem.read_to_string(&path).await?;
            let imports = scan_imports(&content);
            let module = ResolvedModule::new(path, content, imports);

            for specifier in &module.imports {
                if let Some(dependency) = self.resolver.resolve(specifier, module.path()).await {
                    self.visit(session, dependency).await?;
                }
            }

            self.emit(session, module).await
        }
        .boxed()
    }

    async fn emit(&self, session: &mut CopySession, module: ResolvedModule) -> ExportResult<()> {
        if let Some(destination) = &session.destination {
            let relative = RelativePath::strip(self.source_root(), module.path())?;
            let target = relative.under(destination);
            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent).await?;
            }
            self.filesystem.write_file(&target, &module.content).await?;
            session.written += 1;
            debug!(file = %relative, "Copied");
        }
        session.order.push(module.path);
        Ok(())
    }
}
