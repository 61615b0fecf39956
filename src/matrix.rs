//! Test matrix construction.
//!
//! Expands the parameter axes of a [`Config`] into the ordered list of
//! [`TestCase`]s the executor runs. The mapper axes are swept one at a time
//! against the default-option baseline; they are never combined with each
//! other.
//!
//! Case order:
//! 1. one indexer case per index kind, in configured order
//! 2. per read length: baseline, `-sl` values, `-i` values, `-mm` values,
//!    `-e` values, SAM output, `--no-gaps`
//! 3. paired-end mapping, which has no cases yet

use crate::case::{Comparison, TestCase};
use crate::config::{Config, IndexKind, OutputFormat};
use crate::paths::PathHelper;
use crate::policy::ComparisonPolicy;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Resolved executables under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub indexer: PathBuf,
    pub mapper: PathBuf,
}

/// What a group of the matrix contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Planned {
    Cases(Vec<TestCase>),
    /// The group exists but no cases have been written for it yet.
    Unsupported(&'static str),
}

/// A named slice of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseGroup {
    pub name: &'static str,
    pub planned: Planned,
}

impl CaseGroup {
    pub fn cases(&self) -> &[TestCase] {
        match &self.planned {
            Planned::Cases(cases) => cases,
            Planned::Unsupported(_) => &[],
        }
    }
}

/// Builds every group of the matrix, in run order.
pub fn build_matrix(config: &Config, ph: &PathHelper, tools: &Tools) -> Vec<CaseGroup> {
    vec![
        CaseGroup {
            name: "indexer",
            planned: Planned::Cases(indexer_cases(config, ph, &tools.indexer)),
        },
        CaseGroup {
            name: "single-end mapper",
            planned: Planned::Cases(single_end_cases(config, ph, &tools.mapper)),
        },
        paired_end_group(config),
    ]
}

/// Builds the matrix and flattens it into the ordered case list.
pub fn build_cases(config: &Config, ph: &PathHelper, tools: &Tools) -> Vec<TestCase> {
    flatten(build_matrix(config, ph, tools))
}

/// Concatenates the cases of `groups`, keeping group order.
pub fn flatten(groups: Vec<CaseGroup>) -> Vec<TestCase> {
    groups
        .into_iter()
        .flat_map(|group| match group.planned {
            Planned::Cases(cases) => cases,
            Planned::Unsupported(_) => Vec::new(),
        })
        .collect()
}

// ============================================================
// Indexer
// ============================================================

/// `adeno-index-<kind>`
pub fn index_prefix(kind: IndexKind) -> String {
    format!("adeno-index-{kind}")
}

/// Extensions of the golden files `<prefix>.out.*` in `fixture_dir`, sorted.
///
/// The golden index files differ per index kind (a suffix array writes one
/// table, an FM-index several), so the set is discovered rather than listed.
/// A missing fixture directory yields no extensions.
pub fn index_extensions(fixture_dir: &Path, prefix: &str) -> Vec<String> {
    let stem = format!("{prefix}.out.");
    let entries = match std::fs::read_dir(fixture_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read fixtures in {}: {e}", fixture_dir.display());
            return Vec::new();
        }
    };

    let mut exts: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.strip_prefix(&stem)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
        })
        .collect();
    exts.sort();
    exts
}

/// One case per configured index kind.
pub fn indexer_cases(config: &Config, ph: &PathHelper, indexer: &Path) -> Vec<TestCase> {
    config
        .index_kinds
        .iter()
        .map(|&kind| {
            let prefix = index_prefix(kind);
            let out_prefix = format!("{prefix}.out");
            let stdout_name = format!("{prefix}.stdout");

            let exts = index_extensions(&ph.fixture_dir(), &prefix);
            debug!("{prefix}: golden extensions {exts:?}");

            let mut comparisons: Vec<Comparison> = exts
                .iter()
                .map(|ext| {
                    let name = format!("{out_prefix}.{ext}");
                    Comparison::new(ph.in_file(&name), ph.out_file(&name), ComparisonPolicy::Md5)
                })
                .collect();
            comparisons.push(Comparison::new(
                ph.in_file(&stdout_name),
                ph.out_file(&stdout_name),
                ComparisonPolicy::Diff(config.stdout_transforms.clone()),
            ));

            TestCase {
                program: indexer.to_path_buf(),
                args: vec![
                    path_arg(&ph.in_file(&config.genome)),
                    "-x".to_string(),
                    kind.to_string(),
                    "-xp".to_string(),
                    path_arg(&ph.out_file(&out_prefix)),
                ],
                captured_output: ph.out_file(&stdout_name),
                comparisons,
            }
        })
        .collect()
}

// ============================================================
// Single-end mapper
// ============================================================

/// One point of the mapper sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperVariant {
    /// Default options
    Baseline,
    /// `-<name> <value>` on top of the defaults
    Option { name: &'static str, value: String },
    /// SAM output, selected by the output file suffix
    SamOutput,
    /// `--no-gaps`
    NoGaps,
}

impl MapperVariant {
    /// File name segment distinguishing this variant from the baseline.
    pub fn segment(&self) -> Option<String> {
        match self {
            MapperVariant::Baseline => None,
            MapperVariant::Option { name, value } => Some(format!("{name}{value}")),
            MapperVariant::SamOutput => Some(format!("of{}", OutputFormat::Sam)),
            MapperVariant::NoGaps => Some("nogaps".to_string()),
        }
    }

    pub fn format(&self, default: OutputFormat) -> OutputFormat {
        match self {
            MapperVariant::SamOutput => OutputFormat::Sam,
            _ => default,
        }
    }
}

/// The sweep for one read length, in run order.
pub fn mapper_variants(config: &Config) -> Vec<MapperVariant> {
    fn option<T: ToString>(name: &'static str, values: &[T]) -> Vec<MapperVariant> {
        values
            .iter()
            .map(|v| MapperVariant::Option {
                name,
                value: v.to_string(),
            })
            .collect()
    }

    let mut variants = vec![MapperVariant::Baseline];
    variants.extend(option("sl", &config.seed_lengths));
    variants.extend(option("i", &config.mapper_index_kinds));
    variants.extend(option("mm", &config.mapping_modes));
    variants.extend(option("e", &config.error_counts));
    variants.push(MapperVariant::SamOutput);
    variants.push(MapperVariant::NoGaps);
    variants
}

/// `se-adeno-reads<rl>_1` with an optional `-<segment>` suffix.
pub fn mapper_file_stem(read_length: u32, segment: Option<&str>) -> String {
    match segment {
        Some(segment) => format!("se-adeno-reads{read_length}_1-{segment}"),
        None => format!("se-adeno-reads{read_length}_1"),
    }
}

/// Reads fixture for a read length.
pub fn reads_file(read_length: u32) -> String {
    format!("adeno-reads{read_length}_1.fa")
}

/// Builds the case for one variant at one read length.
pub fn mapper_case(
    config: &Config,
    ph: &PathHelper,
    mapper: &Path,
    read_length: u32,
    variant: &MapperVariant,
) -> TestCase {
    let stem = mapper_file_stem(read_length, variant.segment().as_deref());
    let format = variant.format(config.default_format);
    let out_name = format!("{stem}.out.{format}");
    let stdout_name = format!("{stem}.stdout");

    let mut args = Vec::new();
    if let MapperVariant::Option { name, value } = variant {
        args.push(format!("-{name}"));
        args.push(value.clone());
    }
    args.push(path_arg(&ph.in_file(&config.genome)));
    args.push(path_arg(&ph.in_file(&reads_file(read_length))));
    if *variant == MapperVariant::NoGaps {
        args.push("--no-gaps".to_string());
    }
    args.push("-o".to_string());
    args.push(path_arg(&ph.out_file(&out_name)));

    let out_policy = match format {
        OutputFormat::Raw => ComparisonPolicy::Md5,
        OutputFormat::Sam => ComparisonPolicy::raw_diff(),
    };

    TestCase {
        program: mapper.to_path_buf(),
        args,
        captured_output: ph.out_file(&stdout_name),
        comparisons: vec![
            Comparison::new(ph.in_file(&out_name), ph.out_file(&out_name), out_policy),
            Comparison::new(
                ph.in_file(&stdout_name),
                ph.out_file(&stdout_name),
                ComparisonPolicy::Diff(config.stdout_transforms.clone()),
            ),
        ],
    }
}

/// All single-end cases, grouped by read length.
pub fn single_end_cases(config: &Config, ph: &PathHelper, mapper: &Path) -> Vec<TestCase> {
    let variants = mapper_variants(config);
    config
        .read_lengths
        .iter()
        .flat_map(|&rl| {
            variants
                .iter()
                .map(move |variant| mapper_case(config, ph, mapper, rl, variant))
        })
        .collect()
}

// ============================================================
// Paired-end mapper
// ============================================================

fn paired_end_group(config: &Config) -> CaseGroup {
    let reason = "paired-end mapping tests are not written yet";
    if config.paired_end {
        warn!("Skipping paired-end mapper: {reason}");
    }
    CaseGroup {
        name: "paired-end mapper",
        planned: Planned::Unsupported(reason),
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
