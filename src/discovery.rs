//! Fixture discovery and loading.
//!
//! A fixture is a shell script named `test*.sh` paired with a `.out` file
//! holding the expected first line of output. Discovery scans one
//! directory level, and the resulting list is sorted so repeated runs over
//! an unchanged directory produce an identical sequence.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{HarnessError, Result};
use crate::extract;

/// The one script left out of fixture discovery: it drives the whole
/// suite itself and does not follow the invocation pattern.
pub const EXCLUDED_SCRIPT: &str = "testCheck.sh";

/// One test case recovered from a fixture script and its paired
/// expected-output file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// The fixture script this case came from.
    pub script: PathBuf,
    /// Helper program identifier; empty when no line matched, which fails
    /// the comparison downstream instead of erroring at load time.
    pub helper: String,
    /// Argument string for the helper; empty when no line matched.
    pub args: String,
    /// First line of the paired `.out` file, marker-normalized.
    pub expected: String,
    /// False when the helper identifier is outside the supported set.
    pub supported: bool,
}

/// Discovers fixture scripts and loads [`Fixture`] values from them.
#[derive(Debug)]
pub struct FixtureLoader;

impl FixtureLoader {
    /// Scans a directory for `test*.sh` scripts, [`EXCLUDED_SCRIPT`]
    /// included. Sorted for deterministic order.
    pub fn discover_scripts<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        let mut scripts = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| HarnessError::Walk {
                dir: root.to_path_buf(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if Self::is_fixture_script(entry.path()) {
                scripts.push(entry.path().to_path_buf());
            }
        }
        scripts.sort();
        Ok(scripts)
    }

    /// Like [`discover_scripts`](Self::discover_scripts) but without the
    /// excluded suite driver, which is what fixture comparison runs over.
    pub fn discover_fixture_scripts<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
        let mut scripts = Self::discover_scripts(root)?;
        scripts.retain(|path| path.file_name().map_or(true, |name| name != EXCLUDED_SCRIPT));
        Ok(scripts)
    }

    /// Loads one fixture: scans the script for its helper invocation and
    /// reads the first line of the paired `.out` file. A missing or
    /// unreadable `.out` file is a hard error; a script where no line
    /// matches yields empty helper and argument fields.
    pub fn load_fixture(script: &Path) -> Result<Fixture> {
        let source = fs::read_to_string(script).map_err(|e| HarnessError::ScriptRead {
            path: script.to_path_buf(),
            source: e,
        })?;
        let expected = Self::read_expected(script)?;

        let (helper, args, supported) = match extract::scan_script(&source) {
            Some(invocation) => {
                let supported = invocation.is_supported();
                (invocation.helper, invocation.args, supported)
            }
            None => (String::new(), String::new(), true),
        };

        Ok(Fixture {
            script: script.to_path_buf(),
            helper,
            args,
            expected,
            supported,
        })
    }

    /// Discovers and loads every fixture under `root`.
    pub fn load_fixtures<P: AsRef<Path>>(root: P) -> Result<Vec<Fixture>> {
        Self::discover_fixture_scripts(root)?
            .iter()
            .map(|script| Self::load_fixture(script))
            .collect()
    }

    /// Derives the paired expected-output path by suffix substitution.
    pub fn expected_path(script: &Path) -> PathBuf {
        script.with_extension("out")
    }

    fn read_expected(script: &Path) -> Result<String> {
        let path = Self::expected_path(script);
        let content = fs::read_to_string(&path).map_err(|e| HarnessError::ExpectationRead {
            path: path.clone(),
            source: e,
        })?;
        let first = content.lines().next().unwrap_or_default().to_string();
        Ok(extract::normalize_marker(first))
    }

    fn is_fixture_script(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("test") && name.ends_with(".sh"))
    }
}
