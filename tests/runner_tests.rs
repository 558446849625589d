// Process runner behavior against real subprocesses. These need an
// executable shell, so the whole file is unix-only.
#![cfg(unix)]

mod common;

use common::FixtureTree;
use scriptcheck::extract::MARKER_SENTINEL;
use scriptcheck::runner::run_helper;
use scriptcheck::HarnessError;

#[test]
fn captures_the_first_stdout_line() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper("test1", "#!/bin/sh\necho first\necho second\n");

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, "first");
}

#[test]
fn falls_back_to_stderr_when_stdout_is_silent() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper("test2", "#!/bin/sh\necho oops >&2\n");

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, "oops");
}

#[test]
fn stdout_wins_over_stderr() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper("test3", "#!/bin/sh\necho oops >&2\necho fine\n");

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, "fine");
}

#[test]
fn silent_helper_yields_an_empty_string() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper("test4", "#!/bin/sh\nexit 0\n");

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, "");
}

#[test]
fn argument_string_is_split_on_whitespace() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper("test5", "#!/bin/sh\necho \"$#:$2\"\n");

    let line = run_helper(&helper, "-n  mike").unwrap();
    assert_eq!(line, "2:mike");
}

#[test]
fn marker_output_collapses_to_the_sentinel() {
    let tree = FixtureTree::new();
    let helper = tree.add_helper(
        "test6",
        "#!/bin/sh\necho \"PARSE ERROR: bad token at position 4\"\n",
    );

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, MARKER_SENTINEL);
}

#[test]
fn missing_program_is_a_launch_error() {
    let tree = FixtureTree::new();
    let missing = tree.examples.join("test7");

    let error = run_helper(&missing, "-n mike").unwrap_err();
    assert!(matches!(error, HarnessError::Launch { .. }));
}

#[test]
fn long_running_helper_is_released_after_its_first_line() {
    let tree = FixtureTree::new();
    // Emits one line, then would sleep for ten minutes; the scoped child
    // must be killed once the line is read.
    let helper = tree.add_helper("test8", "#!/bin/sh\necho ready\nexec sleep 600\n");

    let line = run_helper(&helper, "").unwrap();
    assert_eq!(line, "ready");
}
