//! In-process language intelligence for BAMC scripts. No JSON-RPC here.
//!
//! Pure functions that operate directly on document text.
//! Uses `lsp-types` for standard data structures (Diagnostic, CompletionItem, etc.)
//! but calls them synchronously. The `server` module wires these into
//! `tower-lsp`; everything below is usable without a transport.
//!
//! Layering, leaf-first: `catalog` (static command and option registries),
//! `context` (what is being typed), `completion` (candidates for a context),
//! `diagnostics` (unknown-command scan), and `bamc` (the service tying them
//! together behind `LanguageService`).

pub mod bamc;
pub mod catalog;
pub mod completion;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod text;

use lsp_types::{CompletionItem, Diagnostic, Position};

pub use bamc::BamcService;

/// Hover information for a position in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Content to display (plain text or markdown).
    pub content: String,
    /// Optional range the hover applies to.
    pub range: Option<lsp_types::Range>,
}

/// In-process language service: pure functions, no transport.
pub trait LanguageService {
    /// Compute diagnostics for the given content.
    fn diagnostics(&self, content: &str) -> Vec<Diagnostic>;

    /// Compute completions at the given position.
    fn completions(&self, content: &str, pos: Position) -> Vec<CompletionItem>;

    /// Fill in documentation for a previously returned completion.
    ///
    /// Services without lazy documentation return the item as-is.
    fn resolve_completion(&self, item: CompletionItem) -> CompletionItem {
        item
    }

    /// Compute hover information at the given position.
    fn hover(&self, content: &str, pos: Position) -> Option<HoverInfo>;
}
