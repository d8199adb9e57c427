//! LSP server implementation.
//!
//! Delegates every IDE operation to `BamcService` and keeps open documents in
//! a `DocumentStore`. Handlers run to completion; no debouncing, no
//! background work.

pub mod documents;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover,
    HoverParams, HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    MessageType, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions, Url,
};
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::lsp::{BamcService, LanguageService};

use self::documents::DocumentStore;

/// LSP backend wrapping `BamcService`.
pub struct Backend {
    /// LSP client handle for notifications.
    client: Client,
    service: BamcService,
    /// Open documents. Never locked across an `.await`.
    documents: Mutex<DocumentStore>,
    /// Options from `initialize`; defaults until then.
    config: Mutex<ServerConfig>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            service: BamcService::new(),
            documents: Mutex::new(DocumentStore::new()),
            config: Mutex::new(ServerConfig::default()),
        }
    }

    fn documents(&self) -> MutexGuard<'_, DocumentStore> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn config(&self) -> ServerConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Full replacement diagnostic set for `text`, or empty when disabled.
    fn diagnostics_for(&self, text: &str) -> Vec<tower_lsp::lsp_types::Diagnostic> {
        if self.config().diagnostics {
            self.service.diagnostics(text)
        } else {
            Vec::new()
        }
    }

    async fn publish(&self, uri: Url, text: &str, version: Option<i32>) {
        let diagnostics = self.diagnostics_for(text);
        debug!(uri = %uri, count = diagnostics.len(), "publishing diagnostics");
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

/// Capabilities advertised in `initialize`.
pub fn capabilities(config: &ServerConfig) -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::INCREMENTAL),
                ..Default::default()
            },
        )),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            trigger_characters: Some(config.trigger_characters()),
            ..Default::default()
        }),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = match ServerConfig::from_options(params.initialization_options.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                ServerConfig::default()
            }
        };
        let capabilities = capabilities(&config);
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config;

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("bamc-lsp initialized");
        self.client
            .log_message(MessageType::INFO, "BAMC language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        debug!(uri = %doc.uri, version = doc.version, "did_open");
        self.documents()
            .open(doc.uri.clone(), doc.text.clone(), doc.version);
        self.publish(doc.uri, &doc.text, Some(doc.version)).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let snapshot = self
            .documents()
            .change(&uri, version, params.content_changes)
            .map(|doc| doc.text.clone());

        let Some(text) = snapshot else {
            warn!(uri = %uri, "change for a document that is not open");
            return;
        };
        self.publish(uri, &text, Some(version)).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let was_open = self.documents().close(&uri);
        if !was_open {
            debug!(uri = %uri, "close for a document that is not open");
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position.position;
        let uri = &params.text_document_position.text_document.uri;

        let items = {
            let documents = self.documents();
            let Some(doc) = documents.get(uri) else {
                debug!(uri = %uri, "completion for unknown document");
                return Ok(None);
            };
            self.service.completions(&doc.text, position)
        };

        debug!(uri = %uri, line = position.line, count = items.len(), "completion");
        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(items)))
        }
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        debug!(label = %item.label, "completion_resolve");
        Ok(self.service.resolve_completion(item))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let pos = params.text_document_position_params.position;
        debug!(line = pos.line, character = pos.character, "hover");
        Ok(None)
    }
}
