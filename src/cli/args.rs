//! Defines the command-line arguments and subcommands for the scriptcheck CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "scriptcheck",
    version,
    about = "Runs shell-script fixtures against compiled example programs."
)]
pub struct ScriptcheckArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover fixtures, run their helpers, and compare first-line output.
    Run {
        /// Directory containing the fixture scripts.
        #[arg(long, default_value = "tests")]
        tests: PathBuf,
        /// Directory containing the compiled example helpers.
        #[arg(long, default_value = "examples")]
        examples: PathBuf,
        /// Only run fixtures whose script name contains this substring.
        #[arg(long)]
        filter: Option<String>,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// List discovered fixtures and their extracted invocations without
    /// running anything.
    List {
        /// Directory containing the fixture scripts.
        #[arg(long, default_value = "tests")]
        tests: PathBuf,
    },
    /// Run each fixture script itself and judge it by exit status.
    Scripts {
        /// Directory containing the fixture scripts.
        #[arg(long, default_value = "tests")]
        tests: PathBuf,
        /// Roster of scripts expected to exit nonzero.
        #[arg(long, default_value = "tests/expected-failures.txt")]
        expected_failures: PathBuf,
    },
}
