//! Error types for the masai regression driver.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for regression driver operations.
pub type Result<T> = std::result::Result<T, RegressError>;

/// Errors that can occur while setting up or running the regression suite.
///
/// Only setup errors ever reach the caller of [`crate::run`]; anything that goes
/// wrong inside a single test case is folded into that case's pass/fail outcome.
#[derive(Error, Debug)]
pub enum RegressError {
    /// Tool executable could not be located under the binary root
    #[error("{name} binary not found (searched: {})", display_dirs(.searched))]
    BinaryNotFound { name: String, searched: Vec<PathBuf> },

    /// Source or binary root does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Expected or actual file is missing
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed transform pattern
    #[error("Invalid transform pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Temporary directory creation or removal failed
    #[error("Temporary directory error: {0}")]
    TempDirError(String),

    /// Tool did not finish within the configured timeout
    #[error("{program} did not finish within {timeout:?}")]
    Timeout {
        program: String,
        timeout: std::time::Duration,
    },

    /// Tool could not be spawned or exited unsuccessfully
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_not_found_lists_searched_dirs() {
        let err = RegressError::BinaryNotFound {
            name: "masai_indexer".to_string(),
            searched: vec![PathBuf::from("/b/bin"), PathBuf::from("/b")],
        };
        assert_eq!(
            err.to_string(),
            "masai_indexer binary not found (searched: /b/bin, /b)"
        );
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let err = RegressError::Timeout {
            program: "masai_mapper".to_string(),
            timeout: std::time::Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "masai_mapper did not finish within 1.5s");
    }
}
