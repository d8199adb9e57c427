//! Language service for BAMC/BAMM scripts.
//!
//! Implements `LanguageService` over the static command catalog. No tree-sitter,
//! no parser: each line is a command word plus arguments the service never
//! looks at.

use lsp_types::{CompletionItem, Diagnostic, Position};
use tracing::debug;

use super::completion::{resolve, resolve_detail};
use super::context::classify;
use super::diagnostics::scan;
use super::text::line_prefix;
use super::{HoverInfo, LanguageService};

/// Language service for BAMC scripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct BamcService;

impl BamcService {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageService for BamcService {
    fn diagnostics(&self, content: &str) -> Vec<Diagnostic> {
        let diags = scan(content);
        debug!(count = diags.len(), "scanned document");
        diags
    }

    fn completions(&self, content: &str, pos: Position) -> Vec<CompletionItem> {
        let Some(prefix) = line_prefix(content, pos) else {
            debug!(line = pos.line, "completion past end of document");
            return Vec::new();
        };
        let context = classify(prefix);
        debug!(?context, prefix, "classified completion context");
        resolve(context, pos)
    }

    fn resolve_completion(&self, item: CompletionItem) -> CompletionItem {
        resolve_detail(item)
    }

    // Advertised so editors stop probing; there is nothing to show yet.
    fn hover(&self, _content: &str, _pos: Position) -> Option<HoverInfo> {
        None
    }
}
