//! Export Service - main application orchestrator.
//!
//! This service sequences the whole export against one workspace:
//! 1. Validate the draft
//! 2. Assemble and validate the theme
//! 3. Emit generated files (concurrently)
//! 4. Copy sections and their dependencies
//! 5. Build with the external toolchain
//! 6. Package the workspace
//!
//! Any stage failure aborts the run. Workspace cleanup belongs to whoever
//! owns the workspace directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ports::{
            ArchiveReport, Archiver, BuildRequest, BuildResult, BuildRunner, Filesystem,
            FragmentStore, ThemeSchema,
        },
        services::{
            dependency_resolver::{DEFAULT_ALIAS, DEFAULT_EXTENSIONS, DependencyResolver},
            emitters::{EmitContext, Emitter, default_emitters, emit_all},
            fragment_loader::{DEFAULT_BASE_NAME, FragmentLoader},
            project_copier::{CopierSettings, ProjectCopier},
            theme_assembler::ThemeAssembler,
        },
    },
    domain::{AssembledTheme, CampaignDraft, DomainValidator as validator, PackageId, ThemeConfig},
    error::ExportResult,
};

/// Adapters the service runs against.
pub struct ExportPorts {
    pub filesystem: Arc<dyn Filesystem>,
    pub fragments: Arc<dyn FragmentStore>,
    pub schema: Arc<dyn ThemeSchema>,
    pub builder: Arc<dyn BuildRunner>,
    pub archiver: Arc<dyn Archiver>,
}

/// Where the campaign sources live and how imports are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub source_root: PathBuf,
    pub alias: String,
    pub extensions: Vec<String>,
    pub base_fragment: String,
    pub copier: CopierSettings,
}

impl ExportSettings {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            alias: DEFAULT_ALIAS.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            base_fragment: DEFAULT_BASE_NAME.into(),
            copier: CopierSettings::default(),
        }
    }
}

/// Identifiers the caller may force for the build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub campaign_id: Option<String>,
    pub variant_id: Option<String>,
}

/// Summary of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub package_id: PackageId,
    pub campaign_id: String,
    pub variant_id: String,
    pub files_emitted: usize,
    pub files_copied: usize,
    pub build: BuildResult,
    pub archive: ArchiveReport,
}

pub struct ExportService {
    filesystem: Arc<dyn Filesystem>,
    assembler: ThemeAssembler,
    copier: ProjectCopier,
    emitters: Vec<Box<dyn Emitter>>,
    builder: Arc<dyn BuildRunner>,
    archiver: Arc<dyn Archiver>,
}

impl ExportService {
    /// Create a new export service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use campex_core::application::{ExportService, ExportSettings, ExportPorts};
    ///
    /// let service = ExportService::new(
    ///     ports,                             // ExportPorts
    ///     ExportSettings::new("./template"), // sources to copy from
    /// );
    /// ```
    pub fn new(ports: ExportPorts, settings: ExportSettings) -> Self {
        let loader = FragmentLoader::new(ports.fragments).with_base_name(settings.base_fragment);
        let resolver = DependencyResolver::new(ports.filesystem.clone(), settings.source_root)
            .with_alias(settings.alias)
            .with_extensions(settings.extensions);

        Self {
            assembler: ThemeAssembler::new(loader, ports.schema),
            copier: ProjectCopier::new(ports.filesystem.clone(), resolver, settings.copier),
            filesystem: ports.filesystem,
            emitters: default_emitters(),
            builder: ports.builder,
            archiver: ports.archiver,
        }
    }

    /// Export a draft into a packaged archive at `output`.
    ///
    /// `workspace` must be an empty directory owned by this run.
    #[instrument(
        skip_all,
        fields(
            variant = %draft.variant_name,
            workspace = %workspace.display(),
            output = %output.display()
        )
    )]
    pub async fn export(
        &self,
        draft: &CampaignDraft,
        workspace: &Path,
        output: &Path,
        options: &ExportOptions,
    ) -> ExportResult<ExportReport> {
        validator::validate_draft(draft)?;
        let sections = validator::validate_sections(draft)?;
        let package_id = draft.package_id();
        info!(package = %package_id, sections = sections.len(), "Exporting campaign");

        // 1. Theme
        let theme = self
            .assembler
            .assemble(&draft.theme_config)
            .await
            .inspect_err(|e| error!(stage = "theme", error = %e, "Export aborted"))?;

        // 2. Generated files
        let context = EmitContext {
            draft,
            package_id: &package_id,
            theme: &theme,
        };
        let emitted = emit_all(self.filesystem.as_ref(), &self.emitters, &context, workspace)
            .await
            .inspect_err(|e| error!(stage = "emit", error = %e, "Export aborted"))?;

        // 3. Sources
        let copied = self
            .copier
            .copy_all(&sections, workspace)
            .await
            .inspect_err(|e| error!(stage = "copy", error = %e, "Export aborted"))?;

        // 4. Build
        let request = build_request(draft, &package_id, workspace, options);
        info!(
            campaign_id = %request.campaign_id,
            variant_id = %request.variant_id,
            "Starting build"
        );
        let build = self.builder.build(&request).await.inspect_err(|e| {
            error!(
                stage = "build",
                campaign_id = %request.campaign_id,
                error = %e,
                "Export aborted"
            )
        })?;

        // 5. Package
        let archive = self
            .archiver
            .pack(workspace, output)
            .await
            .inspect_err(|e| error!(stage = "package", error = %e, "Export aborted"))?;

        info!(
            archive = %archive.path.display(),
            bytes = archive.bytes,
            "Export completed successfully"
        );

        Ok(ExportReport {
            package_id,
            campaign_id: request.campaign_id,
            variant_id: request.variant_id,
            files_emitted: emitted.len(),
            files_copied: copied,
            build,
            archive,
        })
    }

    /// Assemble a theme without touching any workspace.
    ///
    /// Returns the theme and its rendered style block.
    pub async fn preview_theme(
        &self,
        config: &ThemeConfig,
    ) -> ExportResult<(AssembledTheme, String)> {
        let theme = self.assembler.assemble(config).await?;
        let css = theme.render_style_block();
        Ok((theme, css))
    }

    /// Source files an export of `draft` would copy, in copy order.
    pub async fn plan(&self, draft: &CampaignDraft) -> ExportResult<Vec<PathBuf>> {
        validator::validate_draft(draft)?;
        let sections = validator::validate_sections(draft)?;
        self.copier.plan(&sections).await
    }

    /// Workspace-relative paths of the generated files, sorted.
    pub fn generated_files(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.emitters.iter().map(|e| e.relative_path()).collect();
        paths.sort_unstable();
        paths
    }
}

/// Pick the identifiers the toolchain builds against.
///
/// Drafts without a persisted campaign get a fresh campaign id and read their
/// content from the workspace.
fn build_request(
    draft: &CampaignDraft,
    package_id: &PackageId,
    workspace: &Path,
    options: &ExportOptions,
) -> BuildRequest {
    let persisted = options
        .campaign_id
        .clone()
        .or_else(|| draft.campaign_id.clone());

    let content_override = persisted.is_none().then(|| workspace.join("content"));
    let campaign_id = persisted.unwrap_or_else(|| Uuid::new_v4().to_string());
    let variant_id = options
        .variant_id
        .clone()
        .unwrap_or_else(|| package_id.to_string());

    BuildRequest {
        campaign_id,
        variant_id,
        workspace: workspace.to_path_buf(),
        content_override,
    }
}
