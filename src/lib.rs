//! # masai-regress: regression tests for the masai read mapper
//!
//! Drives the `masai_indexer` and `masai_mapper` executables through a fixed
//! matrix of invocations and compares what they write against golden files
//! checked into the source tree.
//!
//! ## Overview
//!
//! A run has three stages:
//! - **Matrix** ([`matrix`]): expand the parameter axes of a [`Config`] into an
//!   ordered list of [`TestCase`]s. Each mapper option is varied on its own
//!   against a default baseline, not cross-producted.
//! - **Execution** ([`runner`]): run each case as a subprocess with stdout
//!   captured to disk, then check every golden file under its
//!   [`ComparisonPolicy`] (md5 equality or a normalized line diff).
//! - **Report** ([`report`]): print one `OK`/`FAILED` line per case and a
//!   summary; the exit status is non-zero if anything failed.
//!
//! ## Example Usage
//!
//! ```no_run
//! # use anyhow::Result;
//! # fn main() -> Result<()> {
//! use masai_regress::{run, Config};
//! use std::path::Path;
//!
//! let report = run(
//!     Path::new("/src/seqan"),
//!     Path::new("/build/seqan"),
//!     &Config::default(),
//!     &mut std::io::stdout(),
//! )?;
//! std::process::exit(report.exit_code());
//! # }
//! ```
//!
//! ## Errors
//!
//! Only setup problems (a missing root directory or tool executable, or no
//! scratch directory) are returned as errors, and they abort the run before
//! any case executes. Problems inside a case only fail that case.

pub mod binary_finder;
pub mod case;
pub mod compare;
pub mod config;
pub mod error;
pub mod matrix;
pub mod paths;
pub mod policy;
pub mod report;
pub mod runner;

use log::info;
use std::io::Write;
use std::path::Path;

pub use case::{Comparison, RunResult, TestCase};
pub use config::{Config, IndexKind, OutputFormat};
pub use error::{RegressError, Result};
pub use matrix::Tools;
pub use paths::PathHelper;
pub use policy::{ComparisonPolicy, Transform};
pub use report::Report;
pub use runner::{CaseRunner, ProcessRunner};

/// Runs the whole masai suite and writes the human readable report to `out`.
///
/// # Arguments
/// * `source_base` - Root of the source tree holding the golden fixtures
/// * `binary_base` - Root of the build tree holding the executables
/// * `config` - Parameter axes and fixture names
/// * `out` - Destination of the per-case lines and the summary
///
/// # Errors
/// Returns an error if either root is missing, if `masai_indexer` or
/// `masai_mapper` cannot be located, or if the report cannot be written.
/// No case is run in the first two situations.
pub fn run<W: Write>(
    source_base: &Path,
    binary_base: &Path,
    config: &Config,
    out: &mut W,
) -> Result<Report> {
    writeln!(out, "Executing test for masai")?;
    writeln!(out, "===========================")?;
    writeln!(out)?;

    let mut paths = PathHelper::new(source_base, binary_base, &config.suite_dir)?;

    let tools = Tools {
        indexer: binary_finder::autolocate_binary(
            paths.binary_base(),
            &config.binary_subdir,
            &config.indexer,
        )?,
        mapper: binary_finder::autolocate_binary(
            paths.binary_base(),
            &config.binary_subdir,
            &config.mapper,
        )?,
    };
    info!("Indexer: {}", tools.indexer.display());
    info!("Mapper: {}", tools.mapper.display());

    let groups = matrix::build_matrix(config, &paths, &tools);
    for group in &groups {
        match &group.planned {
            matrix::Planned::Cases(_) => info!("{}: {} cases", group.name, group.cases().len()),
            matrix::Planned::Unsupported(reason) => info!("{}: skipped, {reason}", group.name),
        }
    }
    let cases = matrix::flatten(groups);
    info!("Running {} test cases", cases.len());

    let mut runner = ProcessRunner::new().with_timeout(config.timeout);
    let report = report::execute(cases, &mut runner, &mut paths, out)?;
    Ok(report)
}
