//! Application layer for campex.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ExportService and its stages)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Merge rules and identifiers live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CopierSettings, ExportOptions, ExportPorts, ExportReport, ExportService, ExportSettings,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Archiver, BuildRunner, Filesystem, FragmentStore, ThemeSchema};

pub use error::{ApplicationError, NO_STDERR};
