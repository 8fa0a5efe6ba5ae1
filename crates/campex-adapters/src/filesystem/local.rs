//! Local filesystem adapter using tokio::fs.

use async_trait::async_trait;
use std::io;
use std::path::Path;

use campex_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ExportError, ExportResult},
};

/// Production filesystem implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn create_dir_all(&self, path: &Path) -> ExportResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| map_io_error(path, e, "create directory"))
    }

    async fn write_file(&self, path: &Path, content: &str) -> ExportResult<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    async fn read_to_string(&self, path: &Path) -> ExportResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e, "read file"))
    }

    async fn is_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ExportError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
