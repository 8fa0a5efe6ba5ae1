//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `campex-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `FragmentStore`: Theme fragment retrieval
//!   - `ThemeSchema`: Theme validation
//!   - `BuildRunner`: Out-of-process toolchain build
//!   - `Archiver`: Directory packaging
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchiveReport, Archiver, BuildRequest, BuildResult, BuildRunner, Filesystem, FragmentStore,
    ThemeSchema,
};

#[cfg(test)]
pub use output::{MockArchiver, MockBuildRunner, MockFilesystem, MockFragmentStore, MockThemeSchema};
