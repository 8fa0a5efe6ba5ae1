//! Build toolchain adapters.

mod process;

pub use process::{DEFAULT_STDERR_LIMIT, ProcessBuildRunner};
