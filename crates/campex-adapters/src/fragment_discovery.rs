//! Fragment directory discovery.
//!
//! This module provides [`discover_fragments_dir`], the entry-point for
//! finding the theme fragments that ship alongside campex when the user did
//! not name a directory explicitly.
//!
//! # Resolution order
//!
//! Directories are probed in this order, stopping at the first one that
//! contains a `base/` category:
//!
//! 1. **`$CAMPEX_FRAGMENTS_DIR`**: environment variable override.
//! 2. **`./fragments`**: relative to the current working directory.
//! 3. **`<executable-dir>/fragments`**: sibling to the `campex` binary.
//! 4. **`../fragments`**: one level above CWD, for `cargo run` from
//!    `target/debug/`.
//!
//! If nothing matches, `None` is returned and a `WARN` is logged. The CLI
//! then asks the user for `--fragments`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use campex_core::domain::FragmentCategory;

/// Environment variable naming the fragment directory.
pub const FRAGMENTS_DIR_ENV: &str = "CAMPEX_FRAGMENTS_DIR";

/// Find the first candidate directory that looks like a fragment store.
#[instrument]
pub fn discover_fragments_dir() -> Option<PathBuf> {
    let found = candidate_paths()
        .into_iter()
        .find(|candidate| is_fragment_store(candidate));

    match &found {
        Some(dir) => info!(path = %dir.display(), "fragment directory found"),
        None => warn!(
            "no fragment directory found; checked ${FRAGMENTS_DIR_ENV}, \
             ./fragments, <exe>/fragments, and ../fragments"
        ),
    }
    found
}

/// A fragment store has at least the `base/` category directory.
pub fn is_fragment_store(dir: &Path) -> bool {
    let ok = dir.join(FragmentCategory::Base.as_str()).is_dir();
    debug!(path = %dir.display(), ok, "checked fragment directory candidate");
    ok
}

/// Build the ordered list of candidate paths to probe.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);

    if let Ok(env_dir) = std::env::var(FRAGMENTS_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }

    paths.push(PathBuf::from("fragments"));

    if let Some(exe_sibling) = exe_sibling_fragments() {
        paths.push(exe_sibling);
    }

    paths.push(PathBuf::from("../fragments"));
    paths
}

/// `<directory of current executable>/fragments`, or `None` if the
/// executable path cannot be determined.
fn exe_sibling_fragments() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("fragments")))
}
