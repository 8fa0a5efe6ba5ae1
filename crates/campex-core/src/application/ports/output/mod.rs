//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `campex-adapters` crate provides implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{FieldError, FragmentCategory};
use crate::error::ExportResult;

/// Environment variable naming the campaign the build targets.
pub const ENV_CAMPAIGN_ID: &str = "BUILD_TARGET_CAMPAIGN_ID";
/// Environment variable naming the variant the build targets.
pub const ENV_VARIANT_ID: &str = "BUILD_TARGET_VARIANT_ID";
/// Environment variable pointing the build at workspace-local content.
pub const ENV_CONTENT_OVERRIDE_DIR: &str = "SSG_CONTENT_OVERRIDE_DIR";

/// Port for filesystem operations.
///
/// Implemented by:
/// - `campex_adapters::filesystem::LocalFilesystem` (production)
/// - `campex_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Creating a directory that already exists is success
/// - `write_file` creates or truncates, never appends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> ExportResult<()>;

    /// Write content to a file.
    async fn write_file(&self, path: &Path, content: &str) -> ExportResult<()>;

    /// Read a whole file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> ExportResult<String>;

    /// Check if path is an existing regular file.
    async fn is_file(&self, path: &Path) -> bool;
}

/// Port for theme fragment retrieval.
///
/// Implemented by:
/// - `campex_adapters::fragment_store::DirectoryFragmentStore` (files on disk)
/// - `campex_adapters::fragment_store::InMemoryFragmentStore` (testing)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FragmentStore: Send + Sync {
    /// Load the raw document for `(category, name)`.
    ///
    /// Returns `Ok(None)` when the store has no such fragment.
    async fn load(&self, category: FragmentCategory, name: &str) -> ExportResult<Option<Value>>;
}

/// Port for validating a merged theme document.
///
/// Implemented by `campex_adapters::schema::JsonSchemaValidator`.
#[cfg_attr(test, mockall::automock)]
pub trait ThemeSchema: Send + Sync {
    /// Pass, or the full list of structured failures.
    fn validate(&self, theme: &Value) -> Result<(), Vec<FieldError>>;
}

/// Everything a build invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub campaign_id: String,
    pub variant_id: String,
    pub workspace: PathBuf,
    /// Set when building from a draft rather than a persisted campaign.
    pub content_override: Option<PathBuf>,
}

impl BuildRequest {
    /// Environment added on top of the inherited one.
    pub fn env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![
            (ENV_CAMPAIGN_ID, self.campaign_id.clone()),
            (ENV_VARIANT_ID, self.variant_id.clone()),
        ];
        if let Some(dir) = &self.content_override {
            env.push((ENV_CONTENT_OVERRIDE_DIR, dir.display().to_string()));
        }
        env
    }
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub exit_code: i32,
    /// Everything the toolchain wrote to stderr (bounded).
    pub stderr: String,
    pub elapsed: Duration,
}

impl BuildResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Port for running the external toolchain build.
///
/// Implemented by `campex_adapters::build::ProcessBuildRunner`.
///
/// A non-zero exit is reported as `ApplicationError::BuildFailed`, so an
/// `Ok` result always has exit code 0. Dropping the returned future stops
/// the build.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildRunner: Send + Sync {
    async fn build(&self, request: &BuildRequest) -> ExportResult<BuildResult>;
}

/// Summary of a finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub path: PathBuf,
    /// Size of the closed archive file.
    pub bytes: u64,
    /// Number of entries, files and directories.
    pub entries: usize,
}

/// Port for packaging a directory into a single archive.
///
/// Implemented by `campex_adapters::archive::ZipArchiver`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn pack(&self, source: &Path, output: &Path) -> ExportResult<ArchiveReport>;
}
