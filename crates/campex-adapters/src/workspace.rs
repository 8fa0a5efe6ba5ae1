//! Export workspaces.
//!
//! One fresh directory per export, removed when the guard drops unless the
//! caller asks to keep it.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use campex_core::{application::ApplicationError, error::ExportResult};

const PREFIX: &str = "campex-";

/// RAII guard over an export workspace directory.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl TempWorkspace {
    /// Create a workspace under the system temp directory.
    pub fn new() -> ExportResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir()
            .map_err(|e| create_failed(&std::env::temp_dir(), e))?;
        Ok(Self::from_dir(dir))
    }

    /// Create a workspace inside `parent`, creating `parent` if needed.
    pub fn new_in(parent: &Path) -> ExportResult<Self> {
        std::fs::create_dir_all(parent).map_err(|e| create_failed(parent, e))?;
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)
            .map_err(|e| create_failed(parent, e))?;
        Ok(Self::from_dir(dir))
    }

    fn from_dir(dir: TempDir) -> Self {
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "Workspace created");
        Self {
            dir: Some(dir),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the directory on disk and return its path.
    pub fn keep(mut self) -> PathBuf {
        if let Some(dir) = self.dir.take() {
            let _ = dir.keep();
        }
        info!(path = %self.path.display(), "Workspace kept");
        self.path.clone()
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                warn!(path = %self.path.display(), error = %e, "Failed to remove workspace");
            } else {
                debug!(path = %self.path.display(), "Workspace removed");
            }
        }
    }
}

fn create_failed(path: &Path, e: io::Error) -> campex_core::error::ExportError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to create workspace: {e}"),
    }
    .into()
}
