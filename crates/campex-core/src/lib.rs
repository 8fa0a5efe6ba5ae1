//! campex core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the campaign
//! export pipeline, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           campex-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ExportService, ThemeAssembler, ...)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, FragmentStore, BuildRunner,│
//! │      ThemeSchema, Archiver)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    campex-adapters (Infrastructure)     │
//! │ (LocalFilesystem, ZipArchiver, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (CampaignDraft, ThemeFragment, PackageId)│
//! │            No I/O, no async             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campex_core::prelude::*;
//!
//! // 1. Wire adapters into the service
//! let service = ExportService::new(ports, ExportSettings::new("./template"));
//!
//! // 2. Export a draft into an owned workspace
//! let report = service
//!     .export(&draft, workspace.path(), "site.zip".as_ref(), &ExportOptions::default())
//!     .await?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExportOptions, ExportPorts, ExportReport, ExportService, ExportSettings,
        ports::{
            ArchiveReport, Archiver, BuildRequest, BuildResult, BuildRunner, Filesystem,
            FragmentStore, ThemeSchema,
        },
    };
    pub use crate::domain::{
        AssembledTheme, CampaignDraft, FieldError, FragmentCategory, PackageId, SectionName,
        ThemeConfig, ThemeFragment,
    };
    pub use crate::error::{ExportError, ExportResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
