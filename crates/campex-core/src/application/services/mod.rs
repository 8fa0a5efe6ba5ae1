//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "export a campaign" or "preview a theme".

pub mod dependency_resolver;
pub mod emitters;
pub mod export_service;
pub mod fragment_loader;
pub mod project_copier;
pub mod theme_assembler;

pub use dependency_resolver::{DependencyResolver, scan_imports};
pub use emitters::{EmitContext, Emitter};
pub use export_service::{ExportOptions, ExportPorts, ExportReport, ExportService, ExportSettings};
pub use fragment_loader::{FragmentLoader, FragmentSet};
pub use project_copier::{CopierSettings, CopySession, ProjectCopier};
pub use theme_assembler::ThemeAssembler;
