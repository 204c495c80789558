//! Runner configuration
//!
//! Every path the runner touches is carried here instead of being read from
//! ambient state. Defaults reproduce the classic layout: `tests/*.in` fed to
//! `./memsim_app`, results in `outputs/*.out`.

use std::path::PathBuf;

/// Default directory scanned for input fixtures.
pub const DEFAULT_TEST_DIR: &str = "tests";
/// Default directory receiving result files.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Default executable under test.
pub const DEFAULT_BINARY: &str = "./memsim_app";
/// Default input fixture extension (without the dot).
pub const DEFAULT_INPUT_EXT: &str = "in";
/// Default result file extension (without the dot).
pub const DEFAULT_OUTPUT_EXT: &str = "out";

/// Configuration for a single run of the fixture runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory containing the input fixtures
    pub test_dir: PathBuf,
    /// Directory receiving one result file per fixture
    pub output_dir: PathBuf,
    /// Executable spawned once per fixture, with no arguments
    pub binary: PathBuf,
    /// Extension identifying input fixtures
    pub input_ext: String,
    /// Extension given to result files
    pub output_ext: String,
    /// Only run fixtures whose name contains this keyword
    pub filter: Option<String>,
    /// Append timings to status lines
    pub verbose: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            binary: PathBuf::from(DEFAULT_BINARY),
            input_ext: DEFAULT_INPUT_EXT.to_string(),
            output_ext: DEFAULT_OUTPUT_EXT.to_string(),
            filter: None,
            verbose: false,
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixture directory
    pub fn with_test_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.test_dir = dir.into();
        self
    }

    /// Set the result directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the executable under test
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the input extension. A leading dot is accepted and ignored.
    pub fn with_input_ext(mut self, ext: impl AsRef<str>) -> Self {
        self.input_ext = normalize_ext(ext.as_ref());
        self
    }

    /// Set the output extension. A leading dot is accepted and ignored.
    pub fn with_output_ext(mut self, ext: impl AsRef<str>) -> Self {
        self.output_ext = normalize_ext(ext.as_ref());
        self
    }

    /// Restrict the run to fixtures whose name contains `keyword`
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Suffix matched against fixture file names, e.g. `.in`
    pub fn input_suffix(&self) -> String {
        format!(".{}", self.input_ext)
    }

    /// Whether a fixture with this base name passes the keyword filter
    pub fn selects(&self, name: &str) -> bool {
        self.filter.as_deref().is_none_or(|keyword| name.contains(keyword))
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}
