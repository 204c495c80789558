//! Progress reporting
//!
//! The driver announces each fixture before it runs and its outcome after, so a
//! hanging binary leaves `<name>... ` visible on the console. Implement
//! `TestReporter` to route progress somewhere other than stdout.

use std::io::{self, Write};

use super::{TestCase, TestOutcome};

/// Trait for reporting fixture progress.
pub trait TestReporter {
    /// Called right before a fixture is handed to the binary
    fn on_test_start(&mut self, case: &TestCase) -> io::Result<()>;

    /// Called once a fixture's outcome is known
    fn on_test_complete(&mut self, case: &TestCase, outcome: &TestOutcome) -> io::Result<()>;

    /// Report a finished fixture in one go.
    fn report(&mut self, case: &TestCase, outcome: &TestOutcome) -> io::Result<()> {
        self.on_test_start(case)?;
        self.on_test_complete(case, outcome)
    }
}

/// Plain-text reporter: one `<name>... STATUS` line per fixture.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
}

impl ConsoleReporter {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_test_start(&mut self, case: &TestCase) -> io::Result<()> {
        write!(self.out, "{}... ", case.name)?;
        self.out.flush()
    }

    fn on_test_complete(&mut self, _case: &TestCase, outcome: &TestOutcome) -> io::Result<()> {
        let status = outcome.status();
        match outcome.run_result() {
            Some(result) if self.verbose => {
                writeln!(self.out, "{} ({}ms)", status, result.duration.as_millis())?
            }
            _ => writeln!(self.out, "{status}")?,
        }
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::runner::{RunResult, RunnerError};

    fn case(name: &str) -> TestCase {
        TestCase {
            name: name.to_string(),
            input_path: PathBuf::from(format!("tests/{name}.in")),
            output_path: PathBuf::from(format!("outputs/{name}.out")),
        }
    }

    fn result(exit_code: i32) -> RunResult {
        RunResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code,
            duration: Duration::from_millis(42),
        }
    }

    fn render(verbose: bool, items: &[(TestCase, TestOutcome)]) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), verbose);
        for (case, outcome) in items {
            reporter.report(case, outcome).unwrap();
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_completed_line() {
        let out = render(false, &[(case("add"), TestOutcome::from_result(result(0)))]);
        insta::assert_snapshot!(out, @"add... COMPLETED");
    }

    #[test]
    fn test_crash_line() {
        let out = render(false, &[(case("bad"), TestOutcome::from_result(result(1)))]);
        insta::assert_snapshot!(out, @"bad... FAILED (Crash)");
    }

    #[test]
    fn test_error_line_is_distinct_from_crash() {
        let err = RunnerError::ReadInput {
            path: PathBuf::from("tests/gone.in"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let out = render(false, &[(case("gone"), TestOutcome::Errored(err))]);
        insta::assert_snapshot!(out, @"gone... ERROR (cannot read input 'tests/gone.in': No such file or directory)");
    }

    #[test]
    fn test_verbose_appends_duration() {
        let out = render(
            true,
            &[
                (case("a"), TestOutcome::from_result(result(0))),
                (case("b"), TestOutcome::from_result(result(-11))),
            ],
        );
        insta::assert_snapshot!(out, @r"
        a... COMPLETED (42ms)
        b... FAILED (Crash) (42ms)
        ");
    }

    #[test]
    fn test_start_is_visible_before_completion() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false);
        reporter.on_test_start(&case("slow")).unwrap();
        assert_eq!(reporter.into_inner(), b"slow... ");
    }
}
