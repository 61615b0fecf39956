//! Command line entry point: `run_tests SOURCE_ROOT_PATH BINARY_ROOT_PATH`.

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process;

use masai_regress::{run, Config};

#[derive(Parser)]
#[command(name = "run_tests")]
#[command(about = "Run the masai indexer and mapper regression tests")]
struct Args {
    /// Directory containing the source tree with the golden test outputs
    source_root: PathBuf,

    /// Directory containing the build tree with the masai executables
    binary_root: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut stdout = std::io::stdout();
    let report = run(&args.source_root, &args.binary_root, &Config::default(), &mut stdout)
        .map_err(|e| {
            error!("Aborting before any test ran: {e}");
            e
        })
        .context("masai regression setup failed")?;

    process::exit(report.exit_code());
}
