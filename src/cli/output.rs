//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for report lines, colorizing output,
//! failure diffs, and generating JSON. By centralizing output logic here,
//! we ensure every command presents results the same way.

use std::io::Write;

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::discovery::Fixture;
use crate::harness::{CaseReport, HarnessConfig, Outcome, Summary};
use crate::scripts::{ScriptReport, ScriptSummary};

fn stdout(config: &HarnessConfig) -> StandardStream {
    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn write_label(out: &mut StandardStream, label: &str, color: Color) {
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(out, "{label}");
    let _ = out.reset();
}

fn script_name(report: &CaseReport) -> String {
    report
        .script
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.script.display().to_string())
}

/// Prints one line per fixture, with failure and error detail indented
/// under the case it belongs to.
pub fn print_report(reports: &[CaseReport], config: &HarnessConfig) {
    let mut out = stdout(config);

    for report in reports {
        let name = script_name(report);
        let invocation = format!("{} {}", report.helper, report.args);
        let invocation = invocation.trim_end();
        match &report.outcome {
            Outcome::Pass => {
                write_label(&mut out, "PASS", Color::Green);
                let _ = writeln!(out, ": {} ({})", name, invocation);
            }
            Outcome::Fail { expected, actual } => {
                write_label(&mut out, "FAIL", Color::Red);
                let _ = writeln!(out, ": {} ({})", name, invocation);
                print_mismatch(&mut out, expected, actual);
            }
            Outcome::Inconclusive { reason } => {
                write_label(&mut out, "INCONCLUSIVE", Color::Yellow);
                let _ = writeln!(out, ": {} ({})", name, reason);
            }
            Outcome::LoadError { message } => {
                write_label(&mut out, "ERROR", Color::Red);
                let _ = writeln!(out, ": {} ({})", name, message);
            }
            Outcome::LaunchError { message } => {
                write_label(&mut out, "ERROR", Color::Red);
                let _ = writeln!(out, ": {} ({})", name, message);
            }
        }
    }
}

/// Prints both lines of a mismatch plus a word-level diff, so a single
/// changed token stands out inside a long summary line.
fn print_mismatch(out: &mut StandardStream, expected: &str, actual: &str) {
    let _ = writeln!(out, "  expected: {expected}");
    let _ = writeln!(out, "  actual:   {actual}");

    let changeset = Changeset::new(expected, actual, " ");
    let _ = write!(out, "  diff:     ");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(text) => {
                let _ = write!(out, "{text} ");
            }
            Difference::Rem(text) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = write!(out, "-{text} ");
                let _ = out.reset();
            }
            Difference::Add(text) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = write!(out, "+{text} ");
                let _ = out.reset();
            }
        }
    }
    let _ = writeln!(out);
}

/// Prints the end-of-run summary line, and repeats the failed fixtures on
/// stderr where they survive stdout redirection.
pub fn print_summary(reports: &[CaseReport], summary: &Summary, config: &HarnessConfig) {
    let mut out = stdout(config);

    let _ = write!(out, "\nSummary: total {}, ", summary.total());
    write_label(&mut out, "passed", Color::Green);
    let _ = write!(out, " {}, ", summary.passed);
    write_label(&mut out, "failed", Color::Red);
    let _ = write!(out, " {}, ", summary.failed);
    write_label(&mut out, "inconclusive", Color::Yellow);
    let _ = write!(out, " {}, ", summary.inconclusive);
    write_label(&mut out, "errored", Color::Red);
    let _ = writeln!(out, " {}", summary.errored);

    if summary.failed > 0 {
        eprintln!("\nFailed fixtures:");
        for report in reports {
            if matches!(report.outcome, Outcome::Fail { .. }) {
                eprintln!("  - {}", script_name(report));
            }
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    cases: &'a [CaseReport],
    summary: &'a Summary,
}

/// Emits the whole run as pretty-printed JSON on stdout.
pub fn print_json(reports: &[CaseReport], summary: &Summary) -> serde_json::Result<()> {
    let payload = JsonReport {
        cases: reports,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// One `list` line: script name, extracted invocation, support status.
pub fn print_fixture_line(fixture: &Fixture) {
    let name = fixture
        .script
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fixture.script.display().to_string());

    if fixture.helper.is_empty() {
        println!("{name}: <no invocation>");
    } else if fixture.supported {
        println!("{name}: {} {}", fixture.helper, fixture.args);
    } else {
        println!("{name}: {} {} (unsupported)", fixture.helper, fixture.args);
    }
}

/// Script-mode report: unexpected outcomes one per line, then the
/// `PASS: n / FAIL: m` tally.
pub fn print_script_report(reports: &[ScriptReport], summary: &ScriptSummary) {
    for report in reports {
        if !report.unexpected {
            continue;
        }
        let name = report
            .script
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.script.display().to_string());
        if report.passed {
            println!("Unexpected PASS: {name}");
        } else {
            println!("Unexpected FAIL: {name}");
        }
    }
    println!("PASS: {} / FAIL: {}", summary.passed, summary.failed);
}
