//! Implementation of the `campex export` command.
//!
//! Responsibility: load the draft, wire the adapters, own the workspace for
//! the duration of the run, and report the result. The pipeline itself
//! lives in `campex_core::application::ExportService`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use campex_adapters::TempWorkspace;
use campex_core::{
    application::{ExportOptions, ExportReport, ExportService},
    domain::{CampaignDraft, PackageId},
};

use crate::{
    cli::{ExportArgs, OutputFormat},
    commands::{build_service, load_draft, resolve_fragments_dir},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Machine-readable result of an export.
#[derive(Debug, Serialize)]
struct ExportSummary {
    package_id: String,
    campaign_id: String,
    variant_id: String,
    archive: PathBuf,
    archive_bytes: u64,
    archive_entries: usize,
    files_generated: usize,
    files_copied: usize,
    build_millis: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace: Option<PathBuf>,
}

impl ExportSummary {
    fn new(report: &ExportReport, workspace: Option<PathBuf>) -> Self {
        Self {
            package_id: report.package_id.to_string(),
            campaign_id: report.campaign_id.clone(),
            variant_id: report.variant_id.clone(),
            archive: report.archive.path.clone(),
            archive_bytes: report.archive.bytes,
            archive_entries: report.archive.entries,
            files_generated: report.files_emitted,
            files_copied: report.files_copied,
            build_millis: report.build.elapsed.as_millis(),
            workspace,
        }
    }
}

/// What `--dry-run` reports.
#[derive(Debug, Serialize)]
struct ExportPlan {
    package_id: String,
    archive: PathBuf,
    generated: Vec<&'static str>,
    copied: Vec<PathBuf>,
}

/// Execute the `campex export` command.
///
/// Dispatch sequence:
/// 1. Load the draft and resolve the fragment directory
/// 2. Decide the archive path, refusing to clobber without `--force`
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Run the export in a fresh workspace
/// 5. Drop or keep the workspace, then report
#[instrument(skip_all, fields(draft = %args.draft.display()))]
pub async fn execute(args: ExportArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Inputs
    let draft = load_draft(&args.draft).await?;
    let fragments = resolve_fragments_dir(args.fragments.as_deref(), &config)?;
    let service = build_service(&config, args.source_root.as_deref(), fragments)?;

    // 2. Archive path
    let package_id = draft.package_id();
    let archive = archive_path(args.out.as_deref(), &config, &package_id);
    if archive.exists() && !args.force && !args.dry_run {
        return Err(CliError::OutputExists { path: archive });
    }

    let options = ExportOptions {
        campaign_id: args.campaign_id.clone(),
        variant_id: args.variant_id.clone(),
    };

    // 3. Dry run
    if args.dry_run {
        return dry_run(&service, &draft, &package_id, archive, &output).await;
    }

    // 4. Export
    let workspace = match &args.workspace_dir {
        Some(parent) => TempWorkspace::new_in(parent)?,
        None => TempWorkspace::new()?,
    };

    output.header(&format!("Exporting '{}'...", draft.variant_name))?;
    let spinner = output.spinner(format!(
        "Building {} with {}",
        package_id, config.toolchain.program
    ));
    let result = service
        .export(&draft, workspace.path(), &archive, &options)
        .await;
    spinner.finish_and_clear();

    // 5. Workspace and report
    let kept = args.keep_workspace.then(|| workspace.keep());
    if let Some(path) = &kept {
        output.info(&format!("Workspace kept at {}", path.display()))?;
    }

    let report = result?;
    info!(archive = %report.archive.path.display(), "Export command finished");
    print_report(&report, kept, &output)
}

/// `--out`, or `<output.dir>/<package>-<timestamp>.zip`.
fn archive_path(out: Option<&Path>, config: &AppConfig, package_id: &PackageId) -> PathBuf {
    match out {
        Some(path) => path.to_path_buf(),
        None => {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            config.output.dir.join(format!("{package_id}-{stamp}.zip"))
        }
    }
}

async fn dry_run(
    service: &ExportService,
    draft: &CampaignDraft,
    package_id: &PackageId,
    archive: PathBuf,
    output: &OutputManager,
) -> CliResult<()> {
    // Theme problems surface here rather than halfway through a real run.
    service.preview_theme(&draft.theme_config).await?;
    let plan = ExportPlan {
        package_id: package_id.to_string(),
        archive,
        generated: service.generated_files(),
        copied: service.plan(draft).await?,
    };

    if output.format() == OutputFormat::Json {
        output.json(&plan)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would export '{}' to {}",
        plan.package_id,
        plan.archive.display()
    ))?;
    output.header("Generated files:")?;
    for path in &plan.generated {
        output.print(&format!("  {path}"))?;
    }
    output.header("Copied sources:")?;
    for path in &plan.copied {
        output.print(&format!("  {}", path.display()))?;
    }
    Ok(())
}

fn print_report(
    report: &ExportReport,
    workspace: Option<PathBuf>,
    output: &OutputManager,
) -> CliResult<()> {
    let summary = ExportSummary::new(report, workspace);

    if output.format() == OutputFormat::Json {
        output.json(&summary)?;
        return Ok(());
    }

    output.success(&format!("Exported {}", summary.archive.display()))?;
    output.field("package", &summary.package_id)?;
    output.field("campaign", &summary.campaign_id)?;
    output.field("variant", &summary.variant_id)?;
    output.field(
        "files",
        format!(
            "{} generated, {} copied",
            summary.files_generated, summary.files_copied
        ),
    )?;
    output.field(
        "archive",
        format!(
            "{} entries, {} bytes",
            summary.archive_entries, summary.archive_bytes
        ),
    )?;
    output.field("build", format!("{} ms", summary.build_millis))?;
    Ok(())
}
