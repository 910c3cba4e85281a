//! Character-stripping pass for identifiers and condition fragments.
//!
//! Removes the statement terminator and the line-comment opener so a name or
//! condition cannot end the current statement or comment out the rest of it.
//! Quotes are not escaped and identifier grammar is not checked. Row values
//! never go through here; they are always bound as parameters.

use std::fmt::Display;

const TERMINATOR: char = ';';
const COMMENT_START: &str = "--";

/// Format `value` and strip every `;` and `--` from it.
///
/// `;` is removed first, then non-overlapping `--` pairs. A run of dashes
/// therefore shrinks to at most one dash, so the output never contains `--`.
pub fn scrub(value: impl Display) -> String {
    value
        .to_string()
        .replace(TERMINATOR, "")
        .replace(COMMENT_START, "")
}

/// Scrub every entry of a column list, keeping order.
pub fn scrub_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| scrub(v.as_ref())).collect()
}
