//! Completion candidates for a classified line context.
//!
//! Candidates go out lean (label, kind, insertion payload). Syntax and
//! description are attached later by `resolve_detail` when the client asks
//! for one item.

use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, InsertTextFormat,
    MarkupContent, MarkupKind, Position, Range, TextEdit,
};
use serde::{Deserialize, Serialize};

use super::catalog::{self, CommandEntry, InsertKind, OptionEntry, BLOCK_OPENER};
use super::context::LineContext;

/// Which catalog a candidate came from, carried in `CompletionItem::data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Command,
    Browser,
    Feature,
}

#[derive(Debug, Serialize, Deserialize)]
struct CandidateData {
    catalog: Source,
}

/// Candidates for `context`, in catalog declaration order.
///
/// `caret` anchors the block opener's replacement edit, which spans column 0
/// of the caret's line through the caret.
pub fn resolve(context: LineContext, caret: Position) -> Vec<CompletionItem> {
    match context {
        LineContext::TopLevel => catalog::commands()
            .entries()
            .iter()
            .map(|entry| {
                let item = command_item(entry);
                if entry.keyword == BLOCK_OPENER {
                    with_line_replacement(item, caret)
                } else {
                    item
                }
            })
            .collect(),
        LineContext::ArgumentOf(command) => {
            let (Some(options), Some(source)) =
                (catalog::options_for(command), source_for(command))
            else {
                return Vec::new();
            };
            options
                .entries()
                .iter()
                .map(|entry| option_item(entry, source))
                .collect()
        }
        LineContext::NoSuggestion => Vec::new(),
    }
}

/// Attach syntax and description to a previously returned candidate.
///
/// Labels that match nothing come back unchanged.
pub fn resolve_detail(mut item: CompletionItem) -> CompletionItem {
    let source = item
        .data
        .clone()
        .and_then(|data| serde_json::from_value::<CandidateData>(data).ok())
        .map_or(Source::Command, |data| data.catalog);

    match source {
        Source::Command => {
            if let Some(entry) = catalog::commands().lookup(&item.label) {
                item.detail = Some(entry.syntax.to_string());
                item.documentation = Some(markdown(entry.description.to_string()));
            }
        }
        Source::Browser | Source::Feature => {
            let options = match source {
                Source::Browser => catalog::browsers(),
                _ => catalog::features(),
            };
            let value = item.label.trim_matches('"');
            if let Some(entry) = options.lookup(value) {
                item.detail = Some(entry.detail.to_string());
                item.documentation = entry.description.map(|d| markdown(d.to_string()));
            }
        }
    }
    item
}

fn source_for(command: &str) -> Option<Source> {
    match command {
        catalog::BROWSER_COMMAND => Some(Source::Browser),
        catalog::FEATURE_COMMAND => Some(Source::Feature),
        _ => None,
    }
}

fn command_item(entry: &CommandEntry) -> CompletionItem {
    CompletionItem {
        label: entry.keyword.to_string(),
        kind: Some(item_kind(entry.kind)),
        insert_text: Some(entry.template.to_string()),
        insert_text_format: Some(text_format(entry.kind)),
        data: tag(Source::Command),
        ..Default::default()
    }
}

fn option_item(entry: &OptionEntry, source: Source) -> CompletionItem {
    CompletionItem {
        label: entry.label(),
        kind: Some(item_kind(entry.kind)),
        insert_text: Some(entry.template.to_string()),
        insert_text_format: Some(text_format(entry.kind)),
        data: tag(source),
        ..Default::default()
    }
}

/// Replace the whole typed prefix instead of relying on the client's word
/// boundaries, which stop at `-`.
fn with_line_replacement(item: CompletionItem, caret: Position) -> CompletionItem {
    let new_text = item.insert_text.clone().unwrap_or_else(|| item.label.clone());
    let range = Range::new(Position::new(caret.line, 0), caret);
    CompletionItem {
        text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, new_text))),
        ..item
    }
}

fn item_kind(kind: InsertKind) -> CompletionItemKind {
    match kind {
        InsertKind::Keyword => CompletionItemKind::KEYWORD,
        InsertKind::Call => CompletionItemKind::FUNCTION,
        InsertKind::Snippet => CompletionItemKind::SNIPPET,
        InsertKind::Value => CompletionItemKind::VALUE,
    }
}

fn text_format(kind: InsertKind) -> InsertTextFormat {
    if kind.is_snippet() {
        InsertTextFormat::SNIPPET
    } else {
        InsertTextFormat::PLAIN_TEXT
    }
}

fn tag(source: Source) -> Option<serde_json::Value> {
    serde_json::to_value(CandidateData { catalog: source }).ok()
}

fn markdown(value: String) -> Documentation {
    Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsp::catalog::{BROWSER_OPTIONS, COMMAND_ENTRIES, FEATURE_OPTIONS};

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn top_level_lists_every_command_in_order() {
        let items = resolve(LineContext::TopLevel, Position::new(0, 0));
        let expected: Vec<&str> = COMMAND_ENTRIES.iter().map(|e| e.keyword).collect();
        assert_eq!(labels(&items), expected);
    }

    #[test]
    fn only_block_opener_carries_text_edit() {
        let caret = Position::new(3, 5);
        let items = resolve(LineContext::TopLevel, caret);
        for item in &items {
            if item.label == BLOCK_OPENER {
                let Some(CompletionTextEdit::Edit(edit)) = &item.text_edit else {
                    panic!("expected a text edit on {}", item.label);
                };
                assert_eq!(edit.range, Range::new(Position::new(3, 0), caret));
                assert!(edit.new_text.starts_with("start-javascript\n"));
                assert!(edit.new_text.ends_with("end-javascript"));
            } else {
                assert!(item.text_edit.is_none(), "{} has a text edit", item.label);
            }
        }
    }

    #[test]
    fn command_presentation_metadata() {
        let items = resolve(LineContext::TopLevel, Position::new(0, 0));
        let visit = items.iter().find(|i| i.label == "visit").unwrap();
        assert_eq!(visit.kind, Some(CompletionItemKind::FUNCTION));
        assert_eq!(visit.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(visit.insert_text.as_deref(), Some("visit \"${1:url}\""));

        let browser = items.iter().find(|i| i.label == "browser").unwrap();
        assert_eq!(browser.kind, Some(CompletionItemKind::KEYWORD));
        assert_eq!(browser.insert_text_format, Some(InsertTextFormat::PLAIN_TEXT));

        let js = items.iter().find(|i| i.label == BLOCK_OPENER).unwrap();
        assert_eq!(js.kind, Some(CompletionItemKind::SNIPPET));
    }

    #[test]
    fn browser_slot_lists_browsers() {
        let items = resolve(LineContext::ArgumentOf("browser"), Position::new(0, 8));
        assert_eq!(labels(&items), vec!["\"chrome\"", "\"firefox\""]);
        assert_eq!(items[0].insert_text.as_deref(), Some("chrome"));
        assert_eq!(items[0].kind, Some(CompletionItemKind::VALUE));
    }

    #[test]
    fn feature_slot_lists_features_in_order() {
        let items = resolve(LineContext::ArgumentOf("feature"), Position::new(0, 8));
        let expected: Vec<String> = FEATURE_OPTIONS.iter().map(OptionEntry::label).collect();
        assert_eq!(labels(&items), expected.iter().map(String::as_str).collect::<Vec<_>>());
        let proxy = items.iter().find(|i| i.label == "\"use-http-proxy\"").unwrap();
        assert_eq!(proxy.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }

    #[test]
    fn no_suggestion_and_unknown_argument_are_empty() {
        assert!(resolve(LineContext::NoSuggestion, Position::new(0, 0)).is_empty());
        assert!(resolve(LineContext::ArgumentOf("visit"), Position::new(0, 0)).is_empty());
    }

    #[test]
    fn resolve_detail_attaches_syntax_and_description() {
        let items = resolve(LineContext::TopLevel, Position::new(0, 0));
        let click = items.into_iter().find(|i| i.label == "click").unwrap();
        assert!(click.detail.is_none());

        let resolved = resolve_detail(click);
        assert_eq!(resolved.detail.as_deref(), Some("click \"selector\""));
        let Some(Documentation::MarkupContent(doc)) = resolved.documentation else {
            panic!("expected markup documentation");
        };
        assert!(doc.value.contains("click event"));
    }

    #[test]
    fn resolve_detail_without_data_uses_command_catalog() {
        let item = CompletionItem {
            label: "visit".into(),
            ..Default::default()
        };
        let resolved = resolve_detail(item);
        assert_eq!(resolved.detail.as_deref(), Some("visit \"url\""));
    }

    #[test]
    fn resolve_detail_unknown_label_is_unchanged() {
        let item = CompletionItem {
            label: "not-a-command".into(),
            detail: Some("kept".into()),
            ..Default::default()
        };
        let resolved = resolve_detail(item.clone());
        assert_eq!(resolved, item);
    }

    #[test]
    fn resolve_detail_for_options() {
        let items = resolve(LineContext::ArgumentOf("feature"), Position::new(0, 8));
        let proxy = items
            .into_iter()
            .find(|i| i.label == "\"use-https-proxy\"")
            .unwrap();
        let resolved = resolve_detail(proxy);
        assert_eq!(resolved.detail.as_deref(), Some("HTTPS Proxy with Args"));
        assert!(resolved.documentation.is_some());

        let items = resolve(LineContext::ArgumentOf("browser"), Position::new(0, 8));
        let chrome = resolve_detail(items[0].clone());
        assert_eq!(chrome.detail.as_deref(), Some(BROWSER_OPTIONS[0].detail));
        assert!(chrome.documentation.is_none());
    }

    #[test]
    fn catalog_entries_are_not_mutated() {
        let _ = resolve(LineContext::TopLevel, Position::new(7, 7));
        let again = resolve(LineContext::TopLevel, Position::new(1, 2));
        let js = again.iter().find(|i| i.label == BLOCK_OPENER).unwrap();
        let Some(CompletionTextEdit::Edit(edit)) = &js.text_edit else {
            panic!("expected a text edit");
        };
        assert_eq!(edit.range, Range::new(Position::new(1, 0), Position::new(1, 2)));
    }
}
