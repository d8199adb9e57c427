//! Open-document text, kept in sync from `didOpen`/`didChange`/`didClose`.
//!
//! The language service only ever sees `&str` snapshots from here.

use std::collections::HashMap;

use lsp_types::{TextDocumentContentChangeEvent, Url};

use crate::lsp::text::position_to_offset;

/// One tracked document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub version: i32,
}

/// Full text of every open document, keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: HashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `uri`, replacing any previous text.
    pub fn open(&mut self, uri: Url, text: String, version: i32) {
        self.docs.insert(uri, Document { text, version });
    }

    /// Apply `changes` in order. Returns the updated document, or `None` if
    /// `uri` is not open.
    pub fn change(
        &mut self,
        uri: &Url,
        version: i32,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Option<&Document> {
        let doc = self.docs.get_mut(uri)?;
        for change in changes {
            apply_change(&mut doc.text, change);
        }
        doc.version = version;
        Some(doc)
    }

    /// Stop tracking `uri`. Returns whether it was open.
    pub fn close(&mut self, uri: &Url) -> bool {
        self.docs.remove(uri).is_some()
    }

    pub fn get(&self, uri: &Url) -> Option<&Document> {
        self.docs.get(uri)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Apply one content change: a ranged edit, or whole-text replacement when
/// the range is absent. Out-of-bounds ranges are clamped.
pub fn apply_change(text: &mut String, change: TextDocumentContentChangeEvent) {
    let Some(range) = change.range else {
        *text = change.text;
        return;
    };
    let start = position_to_offset(text, range.start);
    let end = position_to_offset(text, range.end);
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    text.replace_range(start..end, &change.text);
}
