//! Test case and run result types.

use crate::policy::ComparisonPolicy;
use std::path::PathBuf;

/// One golden file check: `actual` must match `expected` under `policy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub expected: PathBuf,
    pub actual: PathBuf,
    pub policy: ComparisonPolicy,
}

impl Comparison {
    pub fn new(expected: PathBuf, actual: PathBuf, policy: ComparisonPolicy) -> Self {
        Self {
            expected,
            actual,
            policy,
        }
    }
}

/// A single invocation of a tool under test plus its golden comparisons.
///
/// Built once by the matrix builder and consumed once by the executor. Two
/// cases with the same `program` and `args` test the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Executable to run
    pub program: PathBuf,
    /// Arguments, in order
    pub args: Vec<String>,
    /// File that receives the program's standard output
    pub captured_output: PathBuf,
    /// Checks evaluated after the program exits
    pub comparisons: Vec<Comparison>,
}

impl TestCase {
    /// Program followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of executing one [`TestCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub case: TestCase,
    pub passed: bool,
}
