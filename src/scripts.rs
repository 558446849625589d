//! Script exit-status mode.
//!
//! Instead of extracting invocations, this mode runs each fixture script
//! itself with its output discarded and judges it by exit status alone,
//! against a roster of scripts that are known to fail. Unlike fixture
//! comparison, nothing is excluded here; the suite driver script runs too.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::discovery::FixtureLoader;
use crate::errors::{HarnessError, Result};

/// Result of running one fixture script directly.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub script: PathBuf,
    /// Whether the script exited zero.
    pub passed: bool,
    /// Set when the exit status disagrees with the roster: a passing
    /// script that was expected to fail, or a failing one that was not.
    pub unexpected: bool,
}

/// Counts for a whole script-mode run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ScriptSummary {
    pub passed: usize,
    pub failed: usize,
    pub unexpected: usize,
}

impl ScriptSummary {
    pub fn is_success(&self) -> bool {
        self.unexpected == 0
    }
}

/// Reads the expected-failures roster. One script name per line; only
/// the first whitespace-separated token counts and blank lines are
/// ignored, so entries may carry trailing commentary.
pub fn load_roster(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|e| HarnessError::RosterRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_roster(&content))
}

pub(crate) fn parse_roster(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Runs every `test*.sh` under the tests root with discarded output and
/// compares each exit status to the roster. The scripts run with their
/// own directory as working directory, since they reach the example
/// binaries through relative paths.
pub fn run_scripts(tests_root: &Path, roster: &HashSet<String>) -> Result<Vec<ScriptReport>> {
    let scripts = FixtureLoader::discover_scripts(tests_root)?;
    let mut reports = Vec::with_capacity(scripts.len());

    for script in scripts {
        let program = fs::canonicalize(&script).map_err(|e| HarnessError::ScriptRead {
            path: script.clone(),
            source: e,
        })?;
        let dir = program.parent().unwrap_or_else(|| Path::new("."));
        let status = Command::new(&program)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| HarnessError::Launch {
                program: program.clone(),
                source: e,
            })?;

        let passed = status.success();
        let expected_to_fail = script
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| roster.contains(name));
        reports.push(ScriptReport {
            script,
            passed,
            unexpected: passed == expected_to_fail,
        });
    }
    Ok(reports)
}

/// Folds script reports into summary counts.
pub fn summarize(reports: &[ScriptReport]) -> ScriptSummary {
    let mut summary = ScriptSummary::default();
    for report in reports {
        if report.passed {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        if report.unexpected {
            summary.unexpected += 1;
        }
    }
    summary
}
