//! Output comparison policies.
//!
//! Every expected/actual file pair of a test case carries one policy: either an
//! exact md5 match, or a line diff after both sides have been run through an
//! ordered list of text transforms.

use crate::error::Result;
use regex::Regex;
use std::fmt;

/// Pattern for elapsed-time strings such as `12.34 sec` or `1e-05 sec`.
pub const ELAPSED_TIME_PATTERN: &str = r"[0-9.\-e]+ sec";

/// Replacement used to mask elapsed-time strings.
pub const ELAPSED_TIME_PLACEHOLDER: &str = "0.0 sec";

/// A pure `text -> text` rewrite applied to both sides of a line diff.
#[derive(Clone)]
pub struct Transform {
    pattern: Regex,
    replacement: String,
}

impl Transform {
    /// Replaces every match of `pattern` with `replacement`.
    ///
    /// `replacement` may refer to capture groups as `$1` or `${name}`; use
    /// `$$` for a literal dollar sign.
    pub fn regexp_replace(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// Masks run-time dependent timings (`"3.14 sec"` becomes `"0.0 sec"`).
    pub fn elapsed_time() -> Self {
        Self {
            pattern: Regex::new(ELAPSED_TIME_PATTERN).expect("elapsed time pattern is valid"),
            replacement: ELAPSED_TIME_PLACEHOLDER.to_string(),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str() && self.replacement == other.replacement
    }
}

impl Eq for Transform {}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s/{}/{}/", self.pattern.as_str(), self.replacement)
    }
}

/// Applies `transforms` to `text` in list order.
pub fn apply_all(transforms: &[Transform], text: &str) -> String {
    transforms
        .iter()
        .fold(text.to_string(), |acc, t| t.apply(&acc))
}

/// How an actual output file is judged against its golden counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonPolicy {
    /// Byte-exact match, checked via md5 digests
    Md5,
    /// Line diff after applying the transforms in order to both sides.
    /// An empty list is a raw line diff.
    Diff(Vec<Transform>),
}

impl ComparisonPolicy {
    /// Raw line diff with no normalization.
    pub fn raw_diff() -> Self {
        ComparisonPolicy::Diff(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_time_masks_timings() {
        let t = Transform::elapsed_time();
        assert_eq!(
            t.apply("indexing took 12.34 sec\nmapping took 1e-05 sec\n"),
            "indexing took 0.0 sec\nmapping took 0.0 sec\n"
        );
    }

    #[test]
    fn test_elapsed_time_leaves_other_text() {
        let t = Transform::elapsed_time();
        assert_eq!(t.apply("reads: 1000\n"), "reads: 1000\n");
    }

    #[test]
    fn test_replacement_expands_groups() {
        let t = Transform::regexp_replace(r"(\d+) reads mapped", "$1 reads").unwrap();
        assert_eq!(t.apply("1000 reads mapped\n"), "1000 reads\n");

        let literal = Transform::regexp_replace("[0-9]+", "$$1").unwrap();
        assert_eq!(literal.apply("abc 42"), "abc $1");
    }

    #[test]
    fn test_transform_order_matters() {
        let a = Transform::regexp_replace("foo", "bar").unwrap();
        let b = Transform::regexp_replace("bar", "baz").unwrap();
        assert_eq!(apply_all(&[a.clone(), b.clone()], "foo"), "baz");
        assert_eq!(apply_all(&[b, a], "foo"), "bar");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Transform::regexp_replace("(", "x").is_err());
    }

    #[test]
    fn test_transform_equality() {
        assert_eq!(Transform::elapsed_time(), Transform::elapsed_time());
        assert_ne!(
            Transform::elapsed_time(),
            Transform::regexp_replace(ELAPSED_TIME_PATTERN, "x").unwrap()
        );
    }

    #[test]
    fn test_policy_kinds() {
        assert_eq!(ComparisonPolicy::raw_diff(), ComparisonPolicy::Diff(vec![]));
    }
}
