//! Cursor-context classification.
//!
//! BAMC has no grammar worth a tokenizer here. What the user is typing is
//! decided from the current line up to the caret with an ordered list of
//! literal checks: argument slots of `browser` and `feature` first, then
//! "still on the first word", then nothing.

use super::catalog::{BROWSER_COMMAND, FEATURE_COMMAND};

/// What kind of completion applies at the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineContext {
    /// Typing the command word.
    TopLevel,
    /// Typing the first argument of the named command.
    ArgumentOf(&'static str),
    /// Anywhere else.
    NoSuggestion,
}

/// Classify `line`, the text from column 0 to the caret.
pub fn classify(line: &str) -> LineContext {
    // Order matters: "browser " has no inner space once trimmed and would
    // otherwise classify as TopLevel.
    for command in [BROWSER_COMMAND, FEATURE_COMMAND] {
        if in_argument_slot(line, command) {
            return LineContext::ArgumentOf(command);
        }
    }

    if !line.trim().contains(' ') {
        return LineContext::TopLevel;
    }

    LineContext::NoSuggestion
}

/// `^\s*<command>\s+(?:$|")`: the command word, at least one whitespace, then
/// end of input or an opening quote.
fn in_argument_slot(line: &str, command: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix(command) else {
        return false;
    };
    let after_gap = rest.trim_start();
    if after_gap.len() == rest.len() {
        // No separating whitespace: "browsers", "feature-x", "browser"
        return false;
    }
    after_gap.is_empty() || after_gap.starts_with('"')
}
