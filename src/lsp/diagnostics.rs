//! Unknown-command scan over a whole document.
//!
//! Every line's leading token (ASCII letters, digits, `-`) is looked up in the
//! command catalog. Arguments are never checked. The JavaScript passage
//! between `start-javascript` and `end-javascript` is skipped.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use super::catalog::{self, BLOCK_CLOSER, BLOCK_OPENER};
use super::text::{lines, utf16_len};

/// Value of `Diagnostic::source` for everything this crate reports.
pub const DIAGNOSTIC_SOURCE: &str = "bamc-lsp";

/// Line prefixes that mark a comment.
pub const COMMENT_MARKERS: [&str; 2] = ["//", "--"];

/// A line's leading token and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingToken<'a> {
    pub text: &'a str,
    /// Byte offset of the token within its line.
    pub start: usize,
}

/// Leading token of `line`, or `None` for blank, comment and
/// non-word-initial lines.
pub fn leading_token(line: &str) -> Option<LeadingToken<'_>> {
    let body = line.trim_start();
    let start = line.len() - body.len();
    if COMMENT_MARKERS.iter().any(|m| body.starts_with(m)) {
        return None;
    }
    let len = body
        .bytes()
        .take_while(|&b| b.is_ascii_alphanumeric() || b == b'-')
        .count();
    if len == 0 {
        return None;
    }
    Some(LeadingToken {
        text: &body[..len],
        start,
    })
}

/// Scan `text` from the top and report every unknown leading command.
///
/// The result is the complete set for the document; callers replace, not
/// merge, what they published before.
pub fn scan(text: &str) -> Vec<Diagnostic> {
    let commands = catalog::commands();
    let mut diags = Vec::new();
    let mut in_block = false;

    for (line_no, line) in lines(text).enumerate() {
        let Some(token) = leading_token(line) else {
            continue;
        };

        if in_block {
            if token.text == BLOCK_CLOSER {
                in_block = false;
            }
            continue;
        }

        if token.text == BLOCK_OPENER {
            in_block = true;
            continue;
        }

        if !commands.contains(token.text) {
            diags.push(unknown_command(line_no as u32, line, token));
        }
    }

    diags
}

fn unknown_command(line_no: u32, line: &str, token: LeadingToken<'_>) -> Diagnostic {
    let start = utf16_len(&line[..token.start]);
    let end = start + utf16_len(token.text);
    Diagnostic {
        range: Range::new(Position::new(line_no, start), Position::new(line_no, end)),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: format!("Unknown BAMC command: '{}'", token.text),
        ..Default::default()
    }
}
