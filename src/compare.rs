//! Golden file comparison.

use crate::case::Comparison;
use crate::error::{RegressError, Result};
use crate::policy::{apply_all, ComparisonPolicy, Transform};
use similar::TextDiff;
use std::fs::File;
use std::io;
use std::path::Path;

/// Result of evaluating one [`Comparison`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Match,
    /// Files differ; carries a human readable description (digests or diff).
    Mismatch(String),
}

/// Evaluates `comparison` according to its policy.
///
/// # Errors
/// Returns `FileNotFound` if either side is missing, or an I/O error if a file
/// cannot be read.
pub fn compare(comparison: &Comparison) -> Result<Outcome> {
    match &comparison.policy {
        ComparisonPolicy::Md5 => compare_md5(&comparison.expected, &comparison.actual),
        ComparisonPolicy::Diff(transforms) => {
            compare_lines(&comparison.expected, &comparison.actual, transforms)
        }
    }
}

/// Byte equality via md5 digests.
pub fn compare_md5(expected: &Path, actual: &Path) -> Result<Outcome> {
    let expected_digest = file_digest(expected)?;
    let actual_digest = file_digest(actual)?;

    if expected_digest == actual_digest {
        Ok(Outcome::Match)
    } else {
        Ok(Outcome::Mismatch(format!(
            "md5 mismatch: {} ({:x}) vs {} ({:x})",
            expected.display(),
            expected_digest,
            actual.display(),
            actual_digest
        )))
    }
}

/// Line diff after running both sides through `transforms`.
pub fn compare_lines(expected: &Path, actual: &Path, transforms: &[Transform]) -> Result<Outcome> {
    let expected_text = apply_all(transforms, &String::from_utf8_lossy(&read_bytes(expected)?));
    let actual_text = apply_all(transforms, &String::from_utf8_lossy(&read_bytes(actual)?));

    if expected_text == actual_text {
        return Ok(Outcome::Match);
    }

    let expected_name = expected.display().to_string();
    let actual_name = actual.display().to_string();
    let diff = TextDiff::from_lines(&expected_text, &actual_text)
        .unified_diff()
        .context_radius(3)
        .header(&expected_name, &actual_name)
        .to_string();
    Ok(Outcome::Mismatch(diff))
}

/// md5 of a file, streamed so large index tables are never held in memory.
pub fn file_digest(path: &Path) -> Result<md5::Digest> {
    ensure_file(path)?;
    let mut context = md5::Context::new();
    io::copy(&mut File::open(path)?, &mut context)?;
    Ok(context.compute())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    ensure_file(path)?;
    Ok(std::fs::read(path)?)
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RegressError::FileNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn pair(expected: &str, actual: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let e = dir.path().join("expected");
        let a = dir.path().join("actual");
        std::fs::write(&e, expected).unwrap();
        std::fs::write(&a, actual).unwrap();
        (dir, e, a)
    }

    #[test]
    fn test_md5_equal() {
        let (_dir, e, a) = pair("ACGT\n", "ACGT\n");
        assert_eq!(compare_md5(&e, &a).unwrap(), Outcome::Match);
    }

    #[test]
    fn test_md5_ignores_transforms() {
        let (_dir, e, a) = pair("took 1.0 sec\n", "took 2.0 sec\n");
        let c = Comparison::new(e, a, ComparisonPolicy::Md5);
        match compare(&c).unwrap() {
            Outcome::Mismatch(msg) => assert!(msg.contains("md5 mismatch")),
            Outcome::Match => unreachable!(),
        }
    }

    #[test]
    fn test_diff_with_elapsed_time_mask() {
        let (_dir, e, a) = pair("Indexed in 3.21 sec\n", "Indexed in 0.07 sec\n");
        let c = Comparison::new(e, a, ComparisonPolicy::Diff(vec![Transform::elapsed_time()]));
        assert_eq!(compare(&c).unwrap(), Outcome::Match);
    }

    #[test]
    fn test_raw_diff_reports_changed_lines() {
        let (_dir, e, a) = pair("@HD\nread1\t0\n", "@HD\nread1\t16\n");
        let c = Comparison::new(e, a, ComparisonPolicy::raw_diff());
        match compare(&c).unwrap() {
            Outcome::Mismatch(diff) => {
                assert!(diff.contains("-read1\t0"));
                assert!(diff.contains("+read1\t16"));
            }
            Outcome::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_file_digest_streams_large_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adeno-index-fm.out.txt");
        let content = "ACGT".repeat(1 << 18);
        std::fs::write(&path, &content).unwrap();

        assert_eq!(file_digest(&path).unwrap(), md5::compute(content.as_bytes()));
    }

    #[test]
    fn test_file_digest_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(
            file_digest(&missing).unwrap_err(),
            RegressError::FileNotFound(p) if p == missing
        ));
    }

    #[test]
    fn test_missing_actual_file() {
        let dir = tempdir().unwrap();
        let e = dir.path().join("expected");
        std::fs::write(&e, "x").unwrap();
        let missing = dir.path().join("actual");

        let err = compare_md5(&e, &missing).unwrap_err();
        assert!(matches!(err, RegressError::FileNotFound(p) if p == missing));
    }
}
