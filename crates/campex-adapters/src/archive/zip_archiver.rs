//! Packs a directory into a single Deflate-compressed zip archive.
//!
//! Entries are relative to the packed directory (no enclosing folder),
//! `/`-separated, and written in sorted order so the same tree always
//! yields the same entry list.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, result::ZipError, write::SimpleFileOptions};

use campex_core::{
    application::{
        ApplicationError,
        ports::{ArchiveReport, Archiver},
    },
    domain::RelativePath,
    error::ExportResult,
};

/// Failures while writing an archive.
#[derive(Debug, Error)]
enum PackError {
    #[error("output must not be inside the directory being packed ({0})")]
    OutputInsideSource(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Zip(#[from] ZipError),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("{0}")]
    Path(String),
}

/// Zip packager for the export workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    #[instrument(skip(self), fields(source = %source.display(), output = %output.display()))]
    async fn pack(&self, source: &Path, output: &Path) -> ExportResult<ArchiveReport> {
        let source = source.to_path_buf();
        let output = output.to_path_buf();
        let target = output.clone();

        let result = tokio::task::spawn_blocking(move || pack_blocking(&source, &target))
            .await
            .map_err(|e| PackError::Io(io::Error::other(e)))
            .and_then(|r| r);

        match result {
            Ok(report) => {
                info!(bytes = report.bytes, entries = report.entries, "Archive written");
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Packaging failed");
                Err(ApplicationError::ArchiveFailed {
                    path: output,
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

fn pack_blocking(source: &Path, output: &Path) -> Result<ArchiveReport, PackError> {
    let source = source.canonicalize()?;
    let output = resolve_output(output)?;
    if output.starts_with(&source) {
        return Err(PackError::OutputInsideSource(output));
    }
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    match write_archive(&source, &output) {
        Ok(entries) => {
            // size of the closed file
            let bytes = fs::metadata(&output)?.len();
            Ok(ArchiveReport {
                path: output,
                bytes,
                entries,
            })
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&output) {
                debug!(error = %cleanup, "No partial archive to remove");
            }
            Err(e)
        }
    }
}

/// Absolute output path: the longest existing ancestor is canonicalized and
/// the missing tail appended as-is. Creates nothing.
fn resolve_output(output: &Path) -> Result<PathBuf, PackError> {
    if output.file_name().is_none() {
        return Err(PackError::Path(format!(
            "{} is not a file path",
            output.display()
        )));
    }

    let absolute = std::path::absolute(output)?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        let (Some(name), Some(parent)) = (existing.file_name(), existing.parent()) else {
            return Err(PackError::Path(format!(
                "cannot resolve {}",
                output.display()
            )));
        };
        missing.push(name);
        existing = parent;
    }

    let mut resolved = existing.canonicalize()?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn write_archive(source: &Path, output: &Path) -> Result<usize, PackError> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        // maximum Deflate level
        .compression_level(Some(9));

    let mut entries = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = RelativePath::strip(source, entry.path())
            .map_err(|e| PackError::Path(e.to_string()))?;
        let name = relative.to_slash_string();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
        } else if file_type.is_file() {
            zip.start_file(name.as_str(), options)?;
            let mut input = File::open(entry.path())?;
            io::copy(&mut input, &mut zip)?;
        } else {
            debug!(entry = %name, "Skipping non-regular file");
            continue;
        }
        entries += 1;
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(entries)
}
