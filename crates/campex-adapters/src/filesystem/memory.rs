//! In-memory filesystem adapter for testing.

use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use campex_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ExportResult,
};

/// In-memory filesystem for testing.
///
/// Counts writes per path so tests can assert a file was written once.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    writes: HashMap<PathBuf, usize>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file (and its parents) without counting it as a write.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        {
            let mut inner = self.inner.write().unwrap();
            if let Some(parent) = path.parent() {
                add_dirs(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// How many times `path` was written through the port.
    pub fn write_count(&self, path: &Path) -> usize {
        let inner = self.inner.read().unwrap();
        inner.writes.get(path).copied().unwrap_or(0)
    }

    /// Every path written through the port.
    pub fn written_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.writes.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn add_dirs(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn create_dir_all(&self, path: &Path) -> ExportResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        add_dirs(&mut inner.directories, path);
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &str) -> ExportResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        *inner.writes.entry(path.to_path_buf()).or_default() += 1;
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> ExportResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    async fn is_file(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path)
    }
}
