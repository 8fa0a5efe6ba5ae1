// ============================================================================
// domain/error.rs - DRAFT & THEME ERROR DOMAIN
// ============================================================================

use std::fmt;

use thiserror::Error;

/// One structured failure reported by the theme schema.
///
/// `path` is a JSON pointer into the merged theme (`/colors/primary`); the
/// empty string refers to the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported and logged without consuming)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid campaign draft: {0}")]
    InvalidDraft(String),

    #[error("Invalid section name '{name}': {reason}")]
    InvalidSectionName { name: String, reason: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error(
        "Theme failed schema validation with {} error(s): {}",
        .errors.len(),
        summarize(.errors)
    )]
    ThemeValidation { errors: Vec<FieldError> },

    #[error("Theme fragment '{category}/{name}' is not an object")]
    MalformedFragment { category: String, name: String },
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDraft(msg) => vec![
                "Check the draft document exported by the wizard".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidSectionName { name, .. } => vec![
                format!("Section '{}' cannot be mapped to a component file", name),
                "Section names may only contain letters, digits, '-' and '_'".into(),
            ],
            Self::ThemeValidation { errors } => {
                let mut out = vec!["The merged theme is missing required values:".into()];
                out.extend(errors.iter().map(|e| format!("  • {e}")));
                out.push("Check the base fragment and the themeOverrides of the draft".into());
                out
            }
            Self::MalformedFragment { category, name } => vec![
                format!("Fragment '{}/{}' must be a JSON/TOML object", category, name),
                "Fix the fragment file or remove the preset from the draft".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDraft(_)
            | Self::InvalidSectionName { .. }
            | Self::InvalidPath { .. }
            | Self::ThemeValidation { .. } => ErrorCategory::Validation,
            Self::MalformedFragment { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
