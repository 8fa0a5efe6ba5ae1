//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Placeholder reported when a failed build wrote nothing to stderr.
pub const NO_STDERR: &str = "<no stderr output>";

/// Errors that occur during export orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A named fragment is not in the store.
    #[error("Theme fragment '{category}/{name}' not found")]
    FragmentNotFound { category: String, name: String },

    /// A fragment file exists but cannot be parsed.
    #[error("Theme fragment {path} could not be parsed: {reason}")]
    FragmentParse { path: PathBuf, reason: String },

    /// The build toolchain could not be started.
    #[error("Failed to start build toolchain '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The build toolchain exited unsuccessfully.
    #[error("Build failed with exit code {code}: {stderr}")]
    BuildFailed { code: i32, stderr: String },

    /// Packaging the workspace failed.
    #[error("Archive error at {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Fragment store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Build a `BuildFailed`, substituting a placeholder for empty stderr.
    pub fn build_failed(code: i32, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        let stderr = if stderr.trim().is_empty() {
            NO_STDERR.to_string()
        } else {
            stderr
        };
        Self::BuildFailed { code, stderr }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file exists and you have read/write permissions".into(),
                "Check --source-root points at the campaign template sources".into(),
            ],
            Self::FragmentNotFound { category, name } => vec![
                format!("Expected a file named {name}.json or {name}.toml in '{category}/'"),
                "Pass --fragments to point at another fragment directory".into(),
                "Or clear the preset in the draft's themeConfig".into(),
            ],
            Self::FragmentParse { path, .. } => vec![
                format!("Fix the syntax of {}", path.display()),
            ],
            Self::SpawnFailed { program, .. } => vec![
                format!("Make sure '{}' is installed and on your PATH", program),
                "Override the toolchain with CAMPEX_TOOLCHAIN__PROGRAM".into(),
            ],
            Self::BuildFailed { .. } => vec![
                "The toolchain output above shows what went wrong".into(),
                "Re-run with --keep-workspace to inspect the generated project".into(),
            ],
            Self::ArchiveFailed { path, .. } => vec![
                format!("Could not write archive: {}", path.display()),
                "Ensure the output directory exists and is writable".into(),
            ],
            Self::StoreLockError => vec![
                "The fragment store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FragmentNotFound { .. } => ErrorCategory::NotFound,
            Self::FragmentParse { .. } => ErrorCategory::Configuration,
            Self::SpawnFailed { .. } => ErrorCategory::Configuration,
            Self::BuildFailed { .. } => ErrorCategory::Build,
            Self::FilesystemError { .. } | Self::ArchiveFailed { .. } => ErrorCategory::Internal,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stderr_gets_placeholder() {
        match ApplicationError::build_failed(1, "  \n") {
            ApplicationError::BuildFailed { code, stderr } => {
                assert_eq!(code, 1);
                assert_eq!(stderr, NO_STDERR);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stderr_is_kept_verbatim() {
        let err = ApplicationError::build_failed(2, "Type error in Hero.tsx\n");
        assert!(err.to_string().contains("Type error in Hero.tsx"));
        assert_eq!(err.category(), ErrorCategory::Build);
    }

    #[test]
    fn spawn_failure_is_distinct_from_build_failure() {
        let err = ApplicationError::SpawnFailed {
            program: "npx".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("npx")));
    }
}
