//! Configuration for the masai regression suite.
//!
//! Every parameter axis the matrix builder sweeps, and every fixture or tool
//! name it templates, lives here as an explicit value. The builder is a pure
//! function of a `Config` and the paths it is handed.

use crate::policy::Transform;
use std::fmt;
use std::time::Duration;

/// Index type understood by `masai_indexer -x` and `masai_mapper -i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Suffix array
    SuffixArray,
    /// Enhanced suffix array
    EnhancedSuffixArray,
    /// FM-index
    FmIndex,
    /// q-gram index
    QGram,
}

impl IndexKind {
    /// All kinds, in the order the indexer tests run.
    pub const ALL: [IndexKind; 4] = [
        IndexKind::SuffixArray,
        IndexKind::EnhancedSuffixArray,
        IndexKind::FmIndex,
        IndexKind::QGram,
    ];

    /// Command line spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::SuffixArray => "sa",
            IndexKind::EnhancedSuffixArray => "esa",
            IndexKind::FmIndex => "fm",
            IndexKind::QGram => "qgram",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapper output format, selected by the suffix of the `-o` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// masai's native raw format
    Raw,
    /// SAM
    Sam,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Sam => "sam",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for one regression run.
///
/// # Default Values
/// - `suite_dir`: `extras/apps/masai/tests`
/// - `binary_subdir`: `bin`
/// - `index_kinds`: sa, esa, fm, qgram
/// - `read_lengths`: 100
/// - `seed_lengths`: 16, 50
/// - `mapper_index_kinds`: none
/// - `mapping_modes`: all
/// - `error_counts`: 0 through 4
/// - `stdout_transforms`: elapsed-time mask
/// - `timeout`: None (wait for every tool indefinitely)
#[derive(Debug, Clone)]
pub struct Config {
    /// Test suite directory, relative to the source root
    pub suite_dir: String,

    /// Directory holding the tool executables, relative to the binary root
    pub binary_subdir: String,

    /// Name of the indexer executable
    pub indexer: String,

    /// Name of the mapper executable
    pub mapper: String,

    /// Reference genome fixture
    pub genome: String,

    /// Index kinds swept by the indexer tests
    pub index_kinds: Vec<IndexKind>,

    /// Read lengths swept by the single-end mapper tests
    pub read_lengths: Vec<u32>,

    /// Values for `-sl`
    pub seed_lengths: Vec<u32>,

    /// Values for `-i`
    pub mapper_index_kinds: Vec<IndexKind>,

    /// Values for `-mm`
    pub mapping_modes: Vec<String>,

    /// Values for `-e`
    pub error_counts: Vec<u32>,

    /// Format of the mapper's option-sweep outputs
    pub default_format: OutputFormat,

    /// Transforms applied before diffing captured standard output
    pub stdout_transforms: Vec<Transform>,

    /// Request paired-end mapper tests
    pub paired_end: bool,

    /// Kill a tool and fail its case after this long
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            suite_dir: "extras/apps/masai/tests".to_string(),
            binary_subdir: "bin".to_string(),
            indexer: "masai_indexer".to_string(),
            mapper: "masai_mapper".to_string(),
            genome: "adeno-genome.fa".to_string(),
            index_kinds: IndexKind::ALL.to_vec(),
            read_lengths: vec![100],
            seed_lengths: vec![16, 50],
            mapper_index_kinds: Vec::new(),
            mapping_modes: vec!["all".to_string()],
            error_counts: vec![0, 1, 2, 3, 4],
            default_format: OutputFormat::Raw,
            stdout_transforms: vec![Transform::elapsed_time()],
            paired_end: false,
            timeout: None,
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Example
    /// ```
    /// use masai_regress::Config;
    ///
    /// let config = Config::builder()
    ///     .read_lengths(vec![36, 100])
    ///     .error_counts(vec![0, 1])
    ///     .build();
    /// assert_eq!(config.read_lengths, vec![36, 100]);
    /// ```
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for constructing Config instances.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the suite directory relative to the source root.
    pub fn suite_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.suite_dir = dir.into();
        self
    }

    /// Sets the executable directory relative to the binary root.
    pub fn binary_subdir(mut self, dir: impl Into<String>) -> Self {
        self.config.binary_subdir = dir.into();
        self
    }

    pub fn index_kinds(mut self, kinds: Vec<IndexKind>) -> Self {
        self.config.index_kinds = kinds;
        self
    }

    pub fn read_lengths(mut self, lengths: Vec<u32>) -> Self {
        self.config.read_lengths = lengths;
        self
    }

    pub fn seed_lengths(mut self, lengths: Vec<u32>) -> Self {
        self.config.seed_lengths = lengths;
        self
    }

    /// Enables the mapper `-i` sweep. Empty by default.
    pub fn mapper_index_kinds(mut self, kinds: Vec<IndexKind>) -> Self {
        self.config.mapper_index_kinds = kinds;
        self
    }

    pub fn mapping_modes(mut self, modes: Vec<String>) -> Self {
        self.config.mapping_modes = modes;
        self
    }

    pub fn error_counts(mut self, counts: Vec<u32>) -> Self {
        self.config.error_counts = counts;
        self
    }

    /// Replaces the transforms applied to captured standard output.
    pub fn stdout_transforms(mut self, transforms: Vec<Transform>) -> Self {
        self.config.stdout_transforms = transforms;
        self
    }

    pub fn paired_end(mut self, enabled: bool) -> Self {
        self.config.paired_end = enabled;
        self
    }

    /// Sets a per-case timeout.
    ///
    /// Default: None
    pub fn timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "Timeout must be positive");
        self.config.timeout = Some(timeout);
        self
    }

    /// Builds the final Config instance.
    pub fn build(self) -> Config {
        self.config
    }
}
