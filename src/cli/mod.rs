//! The scriptcheck command-line interface.
//!
//! This module is the main entry point for all CLI commands and
//! orchestrates the library modules: discovery, the fixture harness, and
//! script mode.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use miette::IntoDiagnostic;

use crate::cli::args::{Command, ScriptcheckArgs};
use crate::discovery::FixtureLoader;
use crate::harness::{self, HarnessConfig};
use crate::scripts;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = ScriptcheckArgs::parse();

    match args.command {
        Command::Run {
            tests,
            examples,
            filter,
            json,
            no_color,
        } => handle_run(tests, examples, filter, json, no_color),
        Command::List { tests } => handle_list(&tests),
        Command::Scripts {
            tests,
            expected_failures,
        } => handle_scripts(&tests, &expected_failures),
    }
}

/// Handles the `run` subcommand: the full discover, extract, execute,
/// compare pipeline. Exits nonzero when anything failed or errored.
fn handle_run(
    tests: PathBuf,
    examples: PathBuf,
    filter: Option<String>,
    json: bool,
    no_color: bool,
) -> miette::Result<()> {
    let config = HarnessConfig {
        tests_root: tests,
        examples_dir: examples,
        filter,
        use_colors: !no_color && atty::is(atty::Stream::Stdout),
    };

    let reports = harness::run_all(&config)?;
    let summary = harness::summarize(&reports);

    if json {
        output::print_json(&reports, &summary).into_diagnostic()?;
    } else {
        output::print_report(&reports, &config);
        output::print_summary(&reports, &summary, &config);
    }

    if !summary.is_success() {
        process::exit(1);
    }
    Ok(())
}

/// Handles the `list` subcommand: show what discovery and extraction
/// would feed the runner, without launching anything.
fn handle_list(tests: &Path) -> miette::Result<()> {
    let fixtures = FixtureLoader::load_fixtures(tests)?;
    for fixture in &fixtures {
        output::print_fixture_line(fixture);
    }
    println!("{} fixture(s)", fixtures.len());
    Ok(())
}

/// Handles the `scripts` subcommand: run every script directly and check
/// exit statuses against the expected-failures roster.
fn handle_scripts(tests: &Path, expected_failures: &Path) -> miette::Result<()> {
    let roster = scripts::load_roster(expected_failures)?;
    let reports = scripts::run_scripts(tests, &roster)?;
    let summary = scripts::summarize(&reports);

    output::print_script_report(&reports, &summary);

    if !summary.is_success() {
        process::exit(1);
    }
    Ok(())
}
