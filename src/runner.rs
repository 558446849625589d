//! Scoped subprocess execution for helper programs.
//!
//! The contract with a helper is deliberately narrow: launch it with the
//! fixture's argument string, read the first line it writes to standard
//! output, fall back to the first line of standard error, and otherwise
//! report an empty string. Nothing past the first line is consulted, and
//! there is no retry or timeout.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::errors::{HarnessError, Result};
use crate::extract;

/// Owns a spawned helper for the duration of one comparison. Whichever
/// path leaves the comparison, including an early return once a line has
/// been read, the child is killed if still running and reaped, so no
/// zombie or open pipe outlives the case.
struct ScopedChild {
    child: Child,
}

impl ScopedChild {
    fn spawn(program: &Path, args: &str) -> Result<Self> {
        let child = Command::new(program)
            .args(args.split_whitespace())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HarnessError::Launch {
                program: program.to_path_buf(),
                source: e,
            })?;
        Ok(Self { child })
    }
}

impl Drop for ScopedChild {
    fn drop(&mut self) {
        // Kill is a no-op once the child has exited; wait reaps it either way.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Runs a helper with the given argument string and captures the first
/// line it writes, marker-normalized. The argument string is split on
/// whitespace into individual arguments.
pub fn run_helper(program: &Path, args: &str) -> Result<String> {
    let mut scoped = ScopedChild::spawn(program, args)?;

    // The helpers never read stdin; closing it immediately keeps one that
    // tries from blocking on the pipe.
    drop(scoped.child.stdin.take());
    let stdout = scoped.child.stdout.take();
    let stderr = scoped.child.stderr.take();

    let line = match first_line(stdout, program)? {
        Some(line) => line,
        None => first_line(stderr, program)?.unwrap_or_default(),
    };
    Ok(extract::normalize_marker(line))
}

fn first_line<R: Read>(stream: Option<R>, program: &Path) -> Result<Option<String>> {
    let Some(stream) = stream else {
        return Ok(None);
    };
    match BufReader::new(stream).lines().next() {
        Some(Ok(line)) => Ok(Some(line)),
        Some(Err(e)) => Err(HarnessError::OutputRead {
            program: program.to_path_buf(),
            source: e,
        }),
        None => Ok(None),
    }
}
