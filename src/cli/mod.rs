//! CLI module for the fixture runner
//!
//! ## Usage
//!
//! ```text
//! memsim-runner [--tests-dir DIR] [--output-dir DIR] [--binary PATH] [-k EXPR] [-v]
//! ```
//!
//! With no flags it reads `tests/*.in`, runs `./memsim_app` on each, and writes
//! `outputs/*.out`, all relative to the working directory.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! `execute` returns `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::{
    DEFAULT_BINARY, DEFAULT_INPUT_EXT, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_EXT, DEFAULT_TEST_DIR, RunnerConfig,
};
use crate::runner::{ConsoleReporter, RunnerError, TestRunner};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<RunnerError> for CliError {
    /// Render through miette so the user gets the cause chain and a hint.
    fn from(err: RunnerError) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Feed input fixtures to an executable and record what it prints
#[derive(Parser, Debug)]
#[command(name = "memsim-runner")]
#[command(version)]
#[command(about = "Feed input fixtures to an executable and record what it prints", long_about = None)]
pub struct Cli {
    /// Directory containing input fixtures
    #[arg(long = "tests-dir", value_name = "DIR", default_value = DEFAULT_TEST_DIR)]
    pub tests_dir: PathBuf,

    /// Directory receiving one result file per fixture
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Executable run once per fixture, with the fixture on stdin
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BINARY)]
    pub binary: PathBuf,

    /// Extension of input fixtures
    #[arg(long = "input-ext", value_name = "EXT", default_value = DEFAULT_INPUT_EXT)]
    pub input_ext: String,

    /// Extension of result files
    #[arg(long = "output-ext", value_name = "EXT", default_value = DEFAULT_OUTPUT_EXT)]
    pub output_ext: String,

    /// Only run fixtures whose name contains EXPR
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,

    /// Show how long each fixture took
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunnerConfig {
        let config = RunnerConfig::new()
            .with_test_dir(&self.tests_dir)
            .with_output_dir(&self.output_dir)
            .with_binary(&self.binary)
            .with_input_ext(&self.input_ext)
            .with_output_ext(&self.output_ext)
            .with_verbose(self.verbose);
        match &self.filter {
            Some(keyword) => config.with_filter(keyword),
            None => config,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        if !e.message.is_empty() {
            eprintln!("{}", e.message);
        }
        process::exit(e.exit_code.0);
    }
}

/// Execute a run.
///
/// Crashing fixtures still count as a successful run; only fatal errors fail.
pub fn execute(cli: Cli) -> CliResult<()> {
    let config = cli.to_config();
    tracing::debug!(?config, "starting run");

    let runner = TestRunner::new(config);
    let mut reporter = ConsoleReporter::stdout(runner.config().verbose);
    runner.run_all(&mut reporter)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
