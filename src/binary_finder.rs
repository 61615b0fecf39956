//! Locating the masai executables under a build tree.
//!
//! Build trees differ in where they put executables: single-config generators
//! write straight to `<root>/bin`, multi-config ones add a per-configuration
//! subdirectory. We try the usual layouts and never fall back to `$PATH`,
//! since the suite must exercise the freshly built tools.

use crate::error::{RegressError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Per-configuration subdirectories created by multi-config builds.
const BUILD_CONFIGURATIONS: [&str; 4] = ["Release", "Debug", "RelWithDebInfo", "MinSizeRel"];

/// Directories searched for a tool, in search order.
pub fn candidate_dirs(binary_base: &Path, subdir: &str) -> Vec<PathBuf> {
    let base = binary_base.join(subdir);
    let mut dirs = vec![base.clone()];
    dirs.extend(BUILD_CONFIGURATIONS.iter().map(|c| base.join(c)));
    dirs.push(binary_base.to_path_buf());
    dirs
}

/// Find the executable `name` below `binary_base`.
///
/// Search order:
/// 1. `<binary_base>/<subdir>`
/// 2. `<binary_base>/<subdir>/{Release,Debug,RelWithDebInfo,MinSizeRel}`
/// 3. `<binary_base>`
///
/// Only files with the executable bit (or a Windows executable suffix) match.
pub fn autolocate_binary(binary_base: &Path, subdir: &str, name: &str) -> Result<PathBuf> {
    let dirs = candidate_dirs(binary_base, subdir);

    for dir in &dirs {
        if !dir.is_dir() {
            continue;
        }
        if let Ok(path) = which::which_in(name, Some(dir), dir) {
            debug!("Located {name} at {}", path.display());
            return Ok(path);
        }
    }

    Err(RegressError::BinaryNotFound {
        name: name.to_string(),
        searched: dirs,
    })
}
