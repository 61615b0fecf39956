//! Fixture and output path resolution.
//!
//! Golden fixtures live in the source tree under the suite directory; every
//! file a tool writes goes into a private temporary directory that is removed
//! once the run is over.

use crate::error::{RegressError, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Maps logical file names to fixture (input) and scratch (output) paths.
#[derive(Debug)]
pub struct PathHelper {
    source_base: PathBuf,
    binary_base: PathBuf,
    suite_dir: PathBuf,
    out_dir: PathBuf,
    temp_dir: Option<TempDir>,
}

impl PathHelper {
    /// Creates a helper and its temporary output directory.
    ///
    /// # Errors
    /// Returns `DirectoryNotFound` if either root is missing, or
    /// `TempDirError` if the scratch directory cannot be created.
    pub fn new(source_base: &Path, binary_base: &Path, suite_dir: &str) -> Result<Self> {
        for root in [source_base, binary_base] {
            if !root.is_dir() {
                return Err(RegressError::DirectoryNotFound(root.to_path_buf()));
            }
        }

        let temp_dir = tempfile::Builder::new()
            .prefix("masai_tests_")
            .tempdir()
            .map_err(|e| RegressError::TempDirError(format!("Failed to create temp directory: {e}")))?;
        let out_dir = temp_dir.path().to_path_buf();
        debug!("Writing test outputs to {}", out_dir.display());

        Ok(Self {
            source_base: source_base.to_path_buf(),
            binary_base: binary_base.to_path_buf(),
            suite_dir: PathBuf::from(suite_dir),
            out_dir,
            temp_dir: Some(temp_dir),
        })
    }

    /// Path of a golden fixture.
    pub fn in_file(&self, name: &str) -> PathBuf {
        self.fixture_dir().join(name)
    }

    /// Path a tool should write `name` to.
    pub fn out_file(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    /// Directory holding the golden fixtures.
    pub fn fixture_dir(&self) -> PathBuf {
        self.source_base.join(&self.suite_dir)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn binary_base(&self) -> &Path {
        &self.binary_base
    }

    /// Removes the temporary output directory. Safe to call more than once;
    /// failures are logged and otherwise ignored.
    pub fn delete_temp_dir(&mut self) {
        if let Some(dir) = self.temp_dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) => warn!("Failed to remove {}: {e}", path.display()),
            }
        }
    }
}
