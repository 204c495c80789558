#![forbid(unsafe_code)]
//! Fixture runner for `memsim_app`
//!
//! Feeds every `tests/*.in` file to an executable on stdin and records its
//! stdout and stderr in `outputs/*.out`, printing one status line per fixture.
//! The crate is the `memsim-runner` binary's engine: `runner` holds discovery,
//! execution and reporting, `config` the paths, and `cli` the argument layer.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `runner` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod runner;

pub use config::RunnerConfig;
pub use runner::{
    ConsoleReporter, RunResult, RunSummary, RunnerError, TestCase, TestOutcome, TestReporter, TestRunner,
    discover_tests, ensure_output_dir, run_one, write_result,
};
