//! Stand-in masai tools and golden fixtures shared by the integration tests.
//!
//! The stand-ins are small shell scripts: the indexer writes `<xp>.txt`, the
//! mapper writes its `-o` file, and both print a timing line that differs from
//! the golden one so the elapsed-time mask gets exercised.

#![allow(dead_code)]

use anyhow::Result;
use masai_regress::{matrix, Config, PathHelper, Tools};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const INDEXER_SCRIPT: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -xp) xp="$2"; shift ;;
  esac
  shift
done
printf 'INDEX\n' > "$xp.txt"
echo "Index built in 1.23 sec"
"#;

pub const MAPPER_SCRIPT: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
printf 'READS\n' > "$out"
echo "Mapping took 0.51 sec"
"#;

pub struct Suite {
    pub source: TempDir,
    pub binary: TempDir,
}

impl Suite {
    pub fn new() -> Result<Self> {
        let suite = Suite {
            source: TempDir::new()?,
            binary: TempDir::new()?,
        };
        let fixtures = suite.fixture_dir();
        fs::create_dir_all(&fixtures)?;
        fs::write(fixtures.join("adeno-genome.fa"), ">adeno\nACGT\n")?;
        fs::write(fixtures.join("adeno-reads100_1.fa"), ">r1\nACGT\n")?;
        Ok(suite)
    }

    pub fn fixture_dir(&self) -> PathBuf {
        self.source.path().join(Config::default().suite_dir)
    }

    pub fn install_tool(&self, name: &str, script: &str) -> Result<PathBuf> {
        let bin = self.binary.path().join("bin");
        fs::create_dir_all(&bin)?;
        let path = bin.join(name);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// Installs both working stand-in tools and their goldens.
    pub fn with_passing_tools() -> Result<Self> {
        let suite = Suite::new()?;
        suite.install_tool("masai_indexer", INDEXER_SCRIPT)?;
        suite.install_tool("masai_mapper", MAPPER_SCRIPT)?;
        suite.write_goldens()?;
        Ok(suite)
    }

    /// Writes a golden file for every comparison of the default matrix.
    pub fn write_goldens(&self) -> Result<()> {
        let config = Config::default();
        for kind in &config.index_kinds {
            let name = format!("{}.out.txt", matrix::index_prefix(*kind));
            fs::write(self.fixture_dir().join(name), "INDEX\n")?;
        }

        let ph = PathHelper::new(self.source.path(), self.binary.path(), &config.suite_dir)?;
        let tools = Tools {
            indexer: PathBuf::from("masai_indexer"),
            mapper: PathBuf::from("masai_mapper"),
        };
        for case in matrix::build_cases(&config, &ph, &tools) {
            for comparison in &case.comparisons {
                let golden = &comparison.expected;
                if golden.exists() {
                    continue;
                }
                let content = if has_suffix(golden, ".stdout") {
                    if case.program == tools.indexer {
                        "Index built in 9.87 sec\n"
                    } else {
                        "Mapping took 12.5 sec\n"
                    }
                } else {
                    "READS\n"
                };
                fs::write(golden, content)?;
            }
        }
        Ok(())
    }
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().ends_with(suffix)
}
