//! Infrastructure adapters for campex.
//!
//! This crate implements the ports defined in `campex-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod build;
pub mod filesystem;
pub mod fragment_discovery;
pub mod fragment_store;
pub mod schema;
pub mod workspace;

// Re-export commonly used adapters
pub use archive::ZipArchiver;
pub use build::{DEFAULT_STDERR_LIMIT, ProcessBuildRunner};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use fragment_discovery::{FRAGMENTS_DIR_ENV, discover_fragments_dir};
pub use fragment_store::{DirectoryFragmentStore, InMemoryFragmentStore};
pub use schema::JsonSchemaValidator;
pub use workspace::TempWorkspace;
