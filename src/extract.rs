//! Line-oriented extraction of helper invocations from fixture scripts.
//!
//! Fixture scripts are loosely structured shell: somewhere in the file a
//! line invokes one of the example helpers (`test1`, `test2`, ...) with an
//! argument string, and scripts are free to restate that invocation on a
//! later line after setup. Instead of one monolithic pattern, each rule of
//! the invocation grammar is its own function so it can be exercised on
//! its own:
//!
//! - helper-token rule: the leftmost `test<digits>` token on the line;
//! - terminator rule: a token at end of line is a bare invocation;
//! - argument rule: the first `-`, `~` or `/` after the token starts the
//!   argument fragment, captured verbatim to end of line;
//! - redirection rule: a `>` reached before any argument start means the
//!   invocation redirects its output and carries no arguments.
//!
//! A line where no token completes one of these rules yields nothing, and
//! earlier fields survive. Across a whole script the last line that yields
//! an invocation wins.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `test` followed by a maximal run of ASCII digits, anywhere in a line.
    static ref HELPER_TOKEN: Regex = Regex::new(r"test\d+").unwrap();
    /// The helpers that have compiled examples; anything else is unsupported.
    static ref SUPPORTED_HELPER: Regex = Regex::new(r"^test[1-8]$").unwrap();
}

/// Expected-output lines starting with this marker carry a variable
/// multi-line diagnostic tail, so both sides of a comparison collapse to
/// [`MARKER_SENTINEL`].
pub const ERROR_MARKER: &str = "PARSE ERROR";

/// Normalized stand-in for a multi-line parse diagnostic.
pub const MARKER_SENTINEL: &str = "PARSE ERROR ...";

/// A helper invocation recovered from one script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub helper: String,
    pub args: String,
}

impl Invocation {
    /// Whether a compiled example exists for this helper.
    pub fn is_supported(&self) -> bool {
        SUPPORTED_HELPER.is_match(&self.helper)
    }
}

/// Scans one line for a helper invocation. Token candidates are tried
/// left to right; the first one that completes a grammar rule wins.
pub fn scan_line(line: &str) -> Option<Invocation> {
    for token in HELPER_TOKEN.find_iter(line) {
        let rest = &line[token.end()..];
        if is_bare_invocation(rest) {
            return Some(Invocation {
                helper: token.as_str().to_string(),
                args: String::new(),
            });
        }
        if let Some(args) = argument_fragment(rest) {
            return Some(Invocation {
                helper: token.as_str().to_string(),
                args: args.to_string(),
            });
        }
    }
    None
}

/// Folds the line scanner over a whole script. Later invocation lines
/// override earlier ones, so setup lines that mention a helper do not
/// shadow the real invocation further down.
pub fn scan_script(source: &str) -> Option<Invocation> {
    source.lines().filter_map(scan_line).last()
}

/// Collapses a line starting with the multi-line error marker to the
/// fixed sentinel; any other line passes through untouched.
pub fn normalize_marker(line: String) -> String {
    if line.starts_with(ERROR_MARKER) {
        MARKER_SENTINEL.to_string()
    } else {
        line
    }
}

/// Terminator rule: nothing after the token, or a single trailing
/// whitespace character, makes a bare invocation with no arguments.
fn is_bare_invocation(rest: &str) -> bool {
    match rest.as_bytes() {
        [] => true,
        [b] => b.is_ascii_whitespace(),
        _ => false,
    }
}

/// Argument and redirection rules. The remainder must begin with a
/// literal space; scanning left to right, the first `-`, `~` or `/` that
/// still has text after it starts the argument fragment, while a `>`
/// reached first means a redirect-only invocation with empty arguments.
/// Returns `None` when neither rule applies.
fn argument_fragment(rest: &str) -> Option<&str> {
    let tail = rest.strip_prefix(' ')?;
    for (i, ch) in tail.char_indices() {
        match ch {
            '-' | '~' | '/' if i + ch.len_utf8() < tail.len() => {
                return Some(&tail[i..]);
            }
            '>' => return Some(""),
            _ => {}
        }
    }
    None
}
