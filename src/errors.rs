//! Unified error type for the harness.
//!
//! Every fallible stage reports through [`HarnessError`]: walking the
//! fixture directory, reading a fixture script, reading its paired
//! expectation file, launching a helper, or reading a helper's output.
//! The variants carry the offending path so a failure can be traced to a
//! single fixture without any surrounding context.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("failed to walk test directory '{dir}'")]
    #[diagnostic(code(scriptcheck::discovery))]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read fixture script '{path}'")]
    #[diagnostic(code(scriptcheck::discovery))]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read expected output '{path}'")]
    #[diagnostic(
        code(scriptcheck::expectation),
        help("every fixture script needs a matching `.out` file holding the expected first line")
    )]
    ExpectationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch helper '{program}'")]
    #[diagnostic(
        code(scriptcheck::launch),
        help("the example programs must be built before the harness can run them")
    )]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output from helper '{program}'")]
    #[diagnostic(code(scriptcheck::launch))]
    OutputRead {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read expected-failures roster '{path}'")]
    #[diagnostic(
        code(scriptcheck::scripts),
        help("pass --expected-failures to point at the roster of scripts known to fail")
    )]
    RosterRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Renders the error with its full cause chain on one line, for
    /// embedding in a per-fixture report.
    pub fn render_chain(&self) -> String {
        use std::error::Error as _;
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
