//! Full-duplex exchange with a child process
//!
//! A child that fills its stdout pipe stops reading stdin, so writing all of the
//! input before reading any output can deadlock both sides. `communicate` feeds
//! stdin from a scoped writer thread while `wait_with_output` drains stdout and
//! stderr, and only returns once the child has exited and every stream is done.

use std::io::{self, Write};
use std::process::{Child, ExitStatus, Output};
use std::thread;

/// Write `input` to the child's stdin, close it, collect stdout and stderr, and
/// wait for exit.
///
/// A child that exits without consuming its input is not an error: the broken
/// pipe on stdin is swallowed and whatever it printed is returned.
pub fn communicate(mut child: Child, input: &[u8]) -> io::Result<Output> {
    let stdin = child.stdin.take();

    thread::scope(|scope| {
        let writer = stdin.map(|mut stdin| {
            scope.spawn(move || -> io::Result<()> {
                match stdin.write_all(input) {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                }
                // stdin drops here, signalling end of input
            })
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
        }
        Ok(output)
    })
}

/// Numeric exit code of a finished process.
///
/// On Unix a process killed by a signal has no exit code; it is reported as the
/// negated signal number, so a segfault reads as `-11`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
