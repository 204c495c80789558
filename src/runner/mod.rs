//! Fixture runner
//!
//! Discovers `*.in` fixtures, feeds each one to the executable under test, and
//! records what it printed in a matching `*.out` file:
//!
//! ```text
//! tests/add.in  --stdin-->  ./memsim_app  --stdout/stderr-->  outputs/add.out
//! ```
//!
//! Fixtures run one at a time in sorted order. A non-zero exit marks the fixture
//! as crashed; nothing compares output against expectations.
//!
//! ## I/O Boundaries
//!
//! Discovery and process execution go through the traits in `interfaces`, and
//! progress goes through `report::TestReporter`. `TestRunner` wires the default
//! implementations unless told otherwise.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod communicate;
pub mod interfaces;
pub mod report;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::{Duration, Instant};

use crate::config::RunnerConfig;

pub use interfaces::{DefaultProcessExecutor, DefaultTestDiscovery, ProcessExecutor, RunnerError, TestDiscovery};
pub use report::{ConsoleReporter, TestReporter};

/// Line inserted between captured stdout and stderr in a result file.
pub const STDERR_MARKER: &str = "\nSTDERR:\n";

// ============================================================================
// Data model
// ============================================================================

/// A discovered fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Input file name without its extension
    pub name: String,
    pub input_path: PathBuf,
    /// Where the captured output goes
    pub output_path: PathBuf,
}

impl TestCase {
    /// Derive a case from its input path by stripping `input_suffix` from the
    /// file name, so `x.tar.gz` with suffix `.tar.gz` is named `x`. Falls back
    /// to dropping the last extension when the suffix does not match. Returns
    /// `None` for paths without a file name.
    pub fn from_input(input_path: &Path, input_suffix: &str, output_dir: &Path, output_ext: &str) -> Option<Self> {
        let file_name = input_path.file_name()?.to_string_lossy();
        let name = match file_name.strip_suffix(input_suffix) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => input_path.file_stem()?.to_string_lossy().into_owned(),
        };
        let output_path = output_dir.join(format!("{name}.{output_ext}"));

        Some(Self {
            name,
            input_path: input_path.to_path_buf(),
            output_path,
        })
    }
}

/// Everything captured from one execution of the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; negative signal number if killed by a signal
    pub exit_code: i32,
    pub duration: Duration,
}

impl RunResult {
    /// Decode a finished process's output. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn from_output(output: Output, duration: Duration) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: communicate::exit_code(output.status),
            duration,
        }
    }

    pub fn crashed(&self) -> bool {
        self.exit_code != 0
    }
}

/// Classification of a single fixture
#[derive(Debug)]
pub enum TestOutcome {
    /// Exit code zero
    Completed(RunResult),
    /// Any non-zero exit code, including signals
    Crashed(RunResult),
    /// The fixture could not be run or its result could not be saved
    Errored(RunnerError),
}

impl TestOutcome {
    pub fn from_result(result: RunResult) -> Self {
        if result.crashed() {
            TestOutcome::Crashed(result)
        } else {
            TestOutcome::Completed(result)
        }
    }

    /// Status text printed after `<name>... `
    pub fn status(&self) -> String {
        match self {
            TestOutcome::Completed(_) => "COMPLETED".to_string(),
            TestOutcome::Crashed(_) => "FAILED (Crash)".to_string(),
            TestOutcome::Errored(err) => format!("ERROR ({})", err.reason()),
        }
    }

    pub fn run_result(&self) -> Option<&RunResult> {
        match self {
            TestOutcome::Completed(result) | TestOutcome::Crashed(result) => Some(result),
            TestOutcome::Errored(_) => None,
        }
    }
}

/// Counts for a finished run. Only logged, never printed as a report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub crashed: usize,
    pub errored: usize,
    pub duration: Duration,
}

impl RunSummary {
    fn record(&mut self, outcome: &TestOutcome) {
        match outcome {
            TestOutcome::Completed(_) => self.completed += 1,
            TestOutcome::Crashed(_) => self.crashed += 1,
            TestOutcome::Errored(_) => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.crashed + self.errored
    }
}

// ============================================================================
// Operations
// ============================================================================

/// List the files directly inside `test_dir` whose names end with `suffix`,
/// sorted by path.
///
/// Hidden files are skipped, as a shell glob would. An empty directory yields
/// an empty list; a missing or unreadable one is an error.
pub fn discover_tests(test_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, RunnerError> {
    let discovery_error = |source: io::Error| RunnerError::Discovery {
        path: test_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(test_dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(suffix) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!(dir = %test_dir.display(), count = files.len(), "discovered fixtures");
    Ok(files)
}

/// Create `output_dir` and any missing parents. Existing directories are fine.
pub fn ensure_output_dir(output_dir: &Path) -> Result<(), RunnerError> {
    fs::create_dir_all(output_dir).map_err(|source| RunnerError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Read one fixture and run `binary` on it.
pub fn run_one(
    test_path: &Path,
    binary: &Path,
    executor: &impl ProcessExecutor,
) -> Result<RunResult, RunnerError> {
    let input = fs::read_to_string(test_path).map_err(|source| RunnerError::ReadInput {
        path: test_path.to_path_buf(),
        source,
    })?;
    executor.execute(binary, &input)
}

/// Write captured output to `output_path`, replacing any previous content.
///
/// Stdout goes first, verbatim. Non-empty stderr follows after `STDERR_MARKER`.
pub fn write_result(output_path: &Path, result: &RunResult) -> Result<(), RunnerError> {
    let write = || -> io::Result<()> {
        let mut file = BufWriter::new(File::create(output_path)?);
        file.write_all(result.stdout.as_bytes())?;
        if !result.stderr.is_empty() {
            file.write_all(STDERR_MARKER.as_bytes())?;
            file.write_all(result.stderr.as_bytes())?;
        }
        file.flush()
    };

    write().map_err(|source| RunnerError::WriteResult {
        path: output_path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Driver
// ============================================================================

/// Runs every selected fixture in order against the configured binary.
pub struct TestRunner<D = DefaultTestDiscovery, E = DefaultProcessExecutor> {
    config: RunnerConfig,
    discovery: D,
    executor: E,
}

impl TestRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_parts(config, DefaultTestDiscovery, DefaultProcessExecutor)
    }
}

impl<D: TestDiscovery, E: ProcessExecutor> TestRunner<D, E> {
    /// Build a runner with custom discovery and execution strategies.
    pub fn with_parts(config: RunnerConfig, discovery: D, executor: E) -> Self {
        Self {
            config,
            discovery,
            executor,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Discover fixtures in sorted order and apply the keyword filter.
    pub fn collect(&self) -> Result<Vec<TestCase>, RunnerError> {
        let suffix = self.config.input_suffix();
        let mut paths = self.discovery.discover(&self.config.test_dir, &suffix)?;
        paths.sort();

        Ok(paths
            .iter()
            .filter_map(|path| TestCase::from_input(path, &suffix, &self.config.output_dir, &self.config.output_ext))
            .filter(|case| self.config.selects(&case.name))
            .collect())
    }

    /// Run a single fixture and save its result.
    ///
    /// Never fails: problems with this fixture alone come back as
    /// `TestOutcome::Errored`.
    pub fn execute_case(&self, case: &TestCase) -> TestOutcome {
        let result = match run_one(&case.input_path, &self.config.binary, &self.executor) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(test = %case.name, error = %err.reason(), "fixture did not run");
                return TestOutcome::Errored(err);
            }
        };
        tracing::debug!(
            test = %case.name,
            exit_code = result.exit_code,
            elapsed_ms = millis(result.duration),
            "fixture finished"
        );

        if let Err(err) = write_result(&case.output_path, &result) {
            tracing::warn!(test = %case.name, error = %err.reason(), "result not saved");
            return TestOutcome::Errored(err);
        }
        TestOutcome::from_result(result)
    }

    /// Run every fixture.
    ///
    /// Only directory-level problems and console write failures abort the run.
    /// Crashes and per-fixture errors are reported and the run moves on.
    pub fn run_all(&self, reporter: &mut impl TestReporter) -> Result<RunSummary, RunnerError> {
        let start_time = Instant::now();

        ensure_output_dir(&self.config.output_dir)?;
        let cases = self.collect()?;

        let mut summary = RunSummary::default();
        for case in &cases {
            reporter.on_test_start(case).map_err(RunnerError::Console)?;
            let outcome = self.execute_case(case);
            summary.record(&outcome);
            reporter.on_test_complete(case, &outcome).map_err(RunnerError::Console)?;
        }

        summary.duration = start_time.elapsed();
        tracing::info!(
            total = summary.total(),
            completed = summary.completed,
            crashed = summary.crashed,
            errored = summary.errored,
            elapsed_ms = millis(summary.duration),
            "run finished"
        );
        Ok(summary)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
