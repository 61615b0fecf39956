//! Sequential execution and the pass/fail report.

use crate::case::{RunResult, TestCase};
use crate::paths::PathHelper;
use crate::runner::CaseRunner;
use log::info;
use std::io::{self, Write};

/// Separator framing the summary block.
const SUMMARY_RULE: &str = "==============================";

/// Results of a complete run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub results: Vec<RunResult>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    pub fn successful(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status: 0 if every case passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    /// Writes the summary block.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{SUMMARY_RULE}")?;
        writeln!(out, "     total tests: {}", self.total())?;
        writeln!(out, "    failed tests: {}", self.failed())?;
        writeln!(out, "successful tests: {}", self.successful())?;
        writeln!(out, "{SUMMARY_RULE}")?;
        Ok(())
    }
}

/// Runs `cases` one after another, printing `<command line> OK|FAILED` for
/// each, then removes the scratch directory and prints the summary.
///
/// A failing case never stops the run. The scratch directory is released
/// even when writing the report fails part way.
pub fn execute<R, W>(
    cases: Vec<TestCase>,
    runner: &mut R,
    paths: &mut PathHelper,
    out: &mut W,
) -> io::Result<Report>
where
    R: CaseRunner + ?Sized,
    W: Write,
{
    let outcome = run_cases(cases, runner, out);
    paths.delete_temp_dir();
    let report = outcome?;

    report.write_summary(out)?;
    info!(
        "{} of {} cases passed",
        report.successful(),
        report.total()
    );
    Ok(report)
}

fn run_cases<R, W>(cases: Vec<TestCase>, runner: &mut R, out: &mut W) -> io::Result<Report>
where
    R: CaseRunner + ?Sized,
    W: Write,
{
    let mut report = Report::default();
    for case in cases {
        let passed = runner.run(&case);
        writeln!(
            out,
            "{} {}",
            case.command_line(),
            if passed { "OK" } else { "FAILED" }
        )?;
        out.flush()?;
        report.results.push(RunResult { case, passed });
    }
    Ok(report)
}
