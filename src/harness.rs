//! Fixture harness: drives every discovered fixture through the process
//! runner and folds each comparison into a tagged outcome.
//!
//! Outcomes are an explicit enum rather than sentinel strings, so the
//! reporting layer cannot mistake a legitimately empty helper output for
//! an error fallback. Execution is fully sequential; each fixture is
//! loaded, run, and compared before the next one starts.

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::discovery::{Fixture, FixtureLoader};
use crate::errors::Result;
use crate::runner;

/// Fixed explanation attached to every inconclusive outcome.
pub const INCONCLUSIVE_REASON: &str = "only the first 8 helper programs are supported";

/// The outcome of one fixture comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Actual output matched the expectation.
    Pass,
    /// Actual output differed from the expectation.
    Fail { expected: String, actual: String },
    /// The fixture exercises a helper the harness cannot evaluate yet.
    Inconclusive { reason: String },
    /// The fixture script or its expectation file could not be loaded.
    LoadError { message: String },
    /// The helper executable could not be started or read.
    LaunchError { message: String },
}

/// One fixture with its outcome, as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub script: PathBuf,
    pub helper: String,
    pub args: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Counts by outcome for a whole run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub inconclusive: usize,
    pub errored: usize,
}

impl Summary {
    /// True when nothing failed or errored. Inconclusive cases alone do
    /// not fail a run; they flag a coverage gap, not a regression.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.inconclusive + self.errored
    }
}

/// Configuration for harness execution and reporting.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding the fixture scripts.
    pub tests_root: PathBuf,
    /// Directory holding the compiled example helpers.
    pub examples_dir: PathBuf,
    /// Case-insensitive substring filter on fixture script names.
    pub filter: Option<String>,
    pub use_colors: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tests_root: PathBuf::from("tests"),
            examples_dir: PathBuf::from("examples"),
            filter: None,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl HarnessConfig {
    /// Convention-based path of a helper executable.
    pub fn helper_path(&self, helper: &str) -> PathBuf {
        self.examples_dir.join(format!("{helper}{EXE_SUFFIX}"))
    }

    fn matches_filter(&self, script: &Path) -> bool {
        let Some(filter) = self.filter.as_deref() else {
            return true;
        };
        script
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_lowercase().contains(&filter.to_lowercase()))
    }
}

/// Runs one fixture through the process runner and compares its first
/// output line against the expectation.
pub fn run_fixture(fixture: &Fixture, config: &HarnessConfig) -> Outcome {
    if !fixture.supported {
        return Outcome::Inconclusive {
            reason: INCONCLUSIVE_REASON.to_string(),
        };
    }
    let program = config.helper_path(&fixture.helper);
    match runner::run_helper(&program, &fixture.args) {
        Ok(actual) if actual == fixture.expected => Outcome::Pass,
        Ok(actual) => Outcome::Fail {
            expected: fixture.expected.clone(),
            actual,
        },
        Err(error) => Outcome::LaunchError {
            message: error.render_chain(),
        },
    }
}

/// Discovers, loads, and runs every fixture under the configured root.
/// A fixture that fails to load still yields a report with a `LoadError`
/// outcome, so nothing discovered is ever silently dropped.
pub fn run_all(config: &HarnessConfig) -> Result<Vec<CaseReport>> {
    let scripts = FixtureLoader::discover_fixture_scripts(&config.tests_root)?;
    let mut reports = Vec::with_capacity(scripts.len());

    for script in scripts {
        if !config.matches_filter(&script) {
            continue;
        }
        let report = match FixtureLoader::load_fixture(&script) {
            Ok(fixture) => {
                let outcome = run_fixture(&fixture, config);
                CaseReport {
                    script,
                    helper: fixture.helper,
                    args: fixture.args,
                    outcome,
                }
            }
            Err(error) => CaseReport {
                script,
                helper: String::new(),
                args: String::new(),
                outcome: Outcome::LoadError {
                    message: error.render_chain(),
                },
            },
        };
        reports.push(report);
    }
    Ok(reports)
}

/// Folds reports into summary counts.
pub fn summarize(reports: &[CaseReport]) -> Summary {
    let mut summary = Summary::default();
    for report in reports {
        match report.outcome {
            Outcome::Pass => summary.passed += 1,
            Outcome::Fail { .. } => summary.failed += 1,
            Outcome::Inconclusive { .. } => summary.inconclusive += 1,
            Outcome::LoadError { .. } | Outcome::LaunchError { .. } => summary.errored += 1,
        }
    }
    summary
}
