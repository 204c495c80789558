//! Runner I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the two operations that
//! touch the outside world:
//! - Fixture discovery (filesystem scan)
//! - Process execution (spawn + stdin/stdout/stderr exchange)
//!
//! The driver in `runner` only talks to these traits, so dry runs and unit tests
//! can substitute canned behavior. Default implementations hit the real
//! filesystem and spawn real processes.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use miette::Diagnostic;
use thiserror::Error;

use super::RunResult;
use super::communicate::communicate;

/// Errors that occur while running fixtures.
///
/// Directory-level errors are fatal and stop the run; everything else is scoped
/// to a single fixture and reported on its status line.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    #[error("cannot read test directory '{}'", .path.display())]
    #[diagnostic(
        code(memsim_runner::discovery),
        help("pass --tests-dir or run from the directory that contains the fixtures")
    )]
    Discovery { path: PathBuf, source: io::Error },

    #[error("cannot create output directory '{}'", .path.display())]
    #[diagnostic(
        code(memsim_runner::output_dir),
        help("the path must be a writable directory, or a location where one can be created")
    )]
    OutputDir { path: PathBuf, source: io::Error },

    #[error("cannot read input '{}'", .path.display())]
    #[diagnostic(code(memsim_runner::read_input))]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("cannot start '{}'", .binary.display())]
    #[diagnostic(code(memsim_runner::spawn), help("pass --binary with the path to the executable under test"))]
    Spawn { binary: PathBuf, source: io::Error },

    #[error("lost contact with '{}'", .binary.display())]
    #[diagnostic(code(memsim_runner::communicate))]
    Communicate { binary: PathBuf, source: io::Error },

    #[error("cannot write result '{}'", .path.display())]
    #[diagnostic(code(memsim_runner::write_result))]
    WriteResult { path: PathBuf, source: io::Error },

    #[error("cannot write to the console")]
    #[diagnostic(code(memsim_runner::console))]
    Console(#[source] io::Error),
}

impl RunnerError {
    /// Whether this error stops the whole run rather than a single fixture.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RunnerError::Discovery { .. } | RunnerError::OutputDir { .. } | RunnerError::Console(_)
        )
    }

    /// One-line description including the underlying cause.
    pub fn reason(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }
}

// ============================================================================
// Fixture Discovery Interface
// ============================================================================

/// Find fixture files for a run.
pub trait TestDiscovery {
    /// Return the fixture paths in `test_dir` whose names end with `suffix`,
    /// sorted for a deterministic run order.
    fn discover(&self, test_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, RunnerError>;
}

// ============================================================================
// Process Executor Interface
// ============================================================================

/// Run the executable under test against one fixture's input.
pub trait ProcessExecutor {
    /// Feed `input` to `binary` on stdin and capture everything it produces.
    fn execute(&self, binary: &Path, input: &str) -> Result<RunResult, RunnerError>;
}

// ============================================================================
// Default Implementations
// ============================================================================

/// Flat directory listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTestDiscovery;

impl TestDiscovery for DefaultTestDiscovery {
    fn discover(&self, test_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, RunnerError> {
        super::discover_tests(test_dir, suffix)
    }
}

/// Spawns the binary with piped stdio and no arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProcessExecutor;

impl ProcessExecutor for DefaultProcessExecutor {
    fn execute(&self, binary: &Path, input: &str) -> Result<RunResult, RunnerError> {
        let start = Instant::now();

        let child = Command::new(binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                binary: binary.to_path_buf(),
                source,
            })?;
        tracing::debug!(pid = child.id(), binary = %binary.display(), bytes = input.len(), "spawned");

        let output = communicate(child, input.as_bytes()).map_err(|source| RunnerError::Communicate {
            binary: binary.to_path_buf(),
            source,
        })?;

        Ok(RunResult::from_output(output, start.elapsed()))
    }
}
