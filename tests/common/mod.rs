//! Shared builders for on-disk fixture trees used by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway directory tree with `tests/` and `examples/` subdirectories,
/// mirroring the layout the harness expects to find in a real checkout.
pub struct FixtureTree {
    pub root: TempDir,
    pub tests: PathBuf,
    pub examples: PathBuf,
}

impl FixtureTree {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp directory");
        let tests = root.path().join("tests");
        let examples = root.path().join("examples");
        fs::create_dir(&tests).expect("failed to create tests dir");
        fs::create_dir(&examples).expect("failed to create examples dir");
        Self {
            root,
            tests,
            examples,
        }
    }

    /// Writes a fixture script and its paired `.out` expectation file.
    pub fn add_fixture(&self, name: &str, script: &str, expected: &str) -> PathBuf {
        let script_path = self.tests.join(name);
        fs::write(&script_path, script).expect("failed to write fixture script");
        let out_path = script_path.with_extension("out");
        fs::write(&out_path, expected).expect("failed to write expectation file");
        script_path
    }

    /// Writes a fixture script with no paired `.out` file.
    pub fn add_orphan_fixture(&self, name: &str, script: &str) -> PathBuf {
        let script_path = self.tests.join(name);
        fs::write(&script_path, script).expect("failed to write fixture script");
        script_path
    }

    /// Installs an executable stand-in helper under `examples/`.
    #[cfg(unix)]
    pub fn add_helper(&self, name: &str, body: &str) -> PathBuf {
        let path = self.examples.join(name);
        write_executable(&path, body);
        path
    }
}

/// Writes a shell script and marks it executable.
#[cfg(unix)]
pub fn write_executable(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).expect("failed to write script");
    let mut perms = fs::metadata(path)
        .expect("failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("failed to set script permissions");
}

/// A stand-in for the `test1` example: recognizes the two documented
/// argument forms and reports a parse diagnostic for anything else.
#[cfg(unix)]
pub const TEST1_HELPER: &str = r#"#!/bin/sh
case "$*" in
  "-r -n mike") echo "My name (spelled backwards) is: ekim" ;;
  "-n mike") echo "My name is: mike" ;;
  "-n bob") echo "My name is: bob" ;;
  *) echo "PARSE ERROR: unrecognized arguments: $*" ;;
esac
"#;
