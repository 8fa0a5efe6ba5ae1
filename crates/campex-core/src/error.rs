//! Unified error handling for campex core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for export operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    /// Errors from the domain layer (invalid drafts, theme validation).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, build, packaging).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ExportError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run 'campex config list' to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in campex".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }

    /// Shorthand for a filesystem failure at `path`.
    pub fn io(path: impl Into<std::path::PathBuf>, err: impl std::fmt::Display) -> Self {
        ApplicationError::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
        .into()
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Build,
    Internal,
}

/// Convenient result type alias.
pub type ExportResult<T> = Result<T, ExportError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ExportResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ExportResult<T> {
        self.map_err(|e| ExportError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldError;

    #[test]
    fn domain_categories_map_through() {
        let err: ExportError = DomainError::ThemeValidation {
            errors: vec![FieldError::new("/colors/primary", "required")],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn io_helper_builds_filesystem_error() {
        let err = ExportError::io("/tmp/x", "permission denied");
        assert!(matches!(
            err,
            ExportError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let res: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = res.context("rendering").unwrap_err();
        assert!(err.to_string().starts_with("Internal error: rendering"));
    }

    #[test]
    fn lock_errors_are_retryable() {
        assert!(ExportError::from(ApplicationError::StoreLockError).is_retryable());
    }
}
