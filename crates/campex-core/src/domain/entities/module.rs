use std::path::{Path, PathBuf};

/// A source file read during one dependency traversal.
///
/// Identity is `path`; the copier's visited set is keyed by it. Never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub path: PathBuf,
    pub content: String,
    /// Import specifiers found in `content`, in order of first appearance.
    pub imports: Vec<String>,
}

impl ResolvedModule {
    pub fn new(path: impl Into<PathBuf>, content: String, imports: Vec<String>) -> Self {
        Self {
            path: path.into(),
            content,
            imports,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
