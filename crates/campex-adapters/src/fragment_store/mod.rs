//! Theme fragment stores.

mod directory;
mod memory;

pub use directory::DirectoryFragmentStore;
pub use memory::InMemoryFragmentStore;
