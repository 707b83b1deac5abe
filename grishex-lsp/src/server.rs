//! Main language server implementation

use std::collections::HashMap;
use std::sync::Arc;

use crate::features::diagnostics::collect_diagnostics;
use crate::features::folding_ranges::{folding_ranges as collect_folding_ranges, GrishexFoldingRange};
use crate::features::semantic_tokens::{
    collect_semantic_tokens, GrishexSemanticToken, SEMANTIC_TOKEN_KINDS,
};
use grishex_config::{DiagnosticsConfig, GrishexConfig};
use grishex_lexer::language::LANGUAGE_ID;
use grishex_lexer::{
    scan_with, Diagnostic as GrishexDiagnostic, DiagnosticSeverity as GrishexSeverity,
    Position as SourcePosition, Range as SourceRange, Scan, SourceLocation,
};
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, FoldingRange, FoldingRangeParams,
    FoldingRangeProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    NumberOrString, Position, Range, SemanticToken, SemanticTokenType, SemanticTokens,
    SemanticTokensFullOptions, SemanticTokensLegend, SemanticTokensOptions, SemanticTokensParams,
    SemanticTokensResult, ServerCapabilities, ServerInfo, TextDocumentItem,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::Client;
use tracing::{debug, info};

/// The part of the client the server talks back to.
#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>);
}

#[async_trait]
impl LspClient for Client {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        Client::publish_diagnostics(self, uri, diagnostics, version).await;
    }
}

pub trait FeatureProvider: Send + Sync + 'static {
    fn semantic_tokens(&self, scan: &Scan) -> Vec<GrishexSemanticToken>;
    fn folding_ranges(&self, scan: &Scan) -> Vec<GrishexFoldingRange>;
    fn diagnostics(&self, scan: &Scan, config: &DiagnosticsConfig) -> Vec<GrishexDiagnostic>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider;

impl DefaultFeatureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn semantic_tokens(&self, scan: &Scan) -> Vec<GrishexSemanticToken> {
        collect_semantic_tokens(scan)
    }

    fn folding_ranges(&self, scan: &Scan) -> Vec<GrishexFoldingRange> {
        collect_folding_ranges(scan)
    }

    fn diagnostics(&self, scan: &Scan, config: &DiagnosticsConfig) -> Vec<GrishexDiagnostic> {
        collect_diagnostics(scan, config)
    }
}

#[derive(Clone)]
struct DocumentEntry {
    scan: Arc<Scan>,
    text: Arc<String>,
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String, config: &GrishexConfig) -> DocumentEntry {
        let entry = DocumentEntry {
            scan: Arc::new(scan_with(&text, &config.folding.to_scan_options())),
            text: Arc::new(text),
        };
        self.entries.write().await.insert(uri, entry.clone());
        entry
    }

    async fn get(&self, uri: &Url) -> Option<DocumentEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: SEMANTIC_TOKEN_KINDS
            .iter()
            .map(|kind| SemanticTokenType::new(kind.as_str()))
            .collect(),
        token_modifiers: Vec::new(),
    }
}

pub struct GrishexLanguageServer<C = Client, P = DefaultFeatureProvider> {
    client: C,
    config: GrishexConfig,
    documents: DocumentStore,
    features: Arc<P>,
}

impl GrishexLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client, config: GrishexConfig) -> Self {
        Self::with_features(client, config, Arc::new(DefaultFeatureProvider::new()))
    }
}

impl<C, P> GrishexLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, config: GrishexConfig, features: Arc<P>) -> Self {
        Self {
            client,
            config,
            documents: DocumentStore::default(),
            features,
        }
    }

    async fn scan_and_publish(&self, uri: Url, text: String, version: Option<i32>) {
        let entry = self.documents.upsert(uri.clone(), text, &self.config).await;
        let found = self
            .features
            .diagnostics(&entry.scan, &self.config.diagnostics);
        let lines = Utf16Lines::new(&entry.text, entry.scan.location());
        let diagnostics = found
            .iter()
            .map(|diagnostic| to_lsp_diagnostic(diagnostic, &lines))
            .collect();
        debug!(%uri, tokens = entry.scan.tokens.len(), diagnostics = found.len(), "document scanned");
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }

    async fn document_entry(&self, uri: &Url) -> Option<DocumentEntry> {
        self.documents.get(uri).await
    }
}

/// Converts character columns into the UTF-16 columns LSP speaks.
struct Utf16Lines<'a> {
    text: &'a str,
    location: &'a SourceLocation,
}

impl<'a> Utf16Lines<'a> {
    fn new(text: &'a str, location: &'a SourceLocation) -> Self {
        Self { text, location }
    }

    fn column(&self, position: SourcePosition) -> u32 {
        let line = self
            .location
            .line_span(position.line)
            .map(|span| &self.text[span])
            .unwrap_or("");
        line.chars()
            .take(position.column)
            .map(char::len_utf16)
            .sum::<usize>() as u32
    }

    fn position(&self, position: SourcePosition) -> Position {
        Position::new(position.line as u32, self.column(position))
    }

    fn range(&self, range: &SourceRange) -> Range {
        Range {
            start: self.position(range.start),
            end: self.position(range.end),
        }
    }
}

fn to_lsp_severity(severity: GrishexSeverity) -> DiagnosticSeverity {
    match severity {
        GrishexSeverity::Error => DiagnosticSeverity::ERROR,
        GrishexSeverity::Warning => DiagnosticSeverity::WARNING,
        GrishexSeverity::Information => DiagnosticSeverity::INFORMATION,
        GrishexSeverity::Hint => DiagnosticSeverity::HINT,
    }
}

fn to_lsp_diagnostic(diagnostic: &GrishexDiagnostic, lines: &Utf16Lines<'_>) -> Diagnostic {
    Diagnostic {
        range: lines.range(&diagnostic.range),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        code: Some(NumberOrString::String(diagnostic.code().to_string())),
        source: Some(diagnostic.source.clone()),
        message: diagnostic.message.clone(),
        ..Diagnostic::default()
    }
}

fn encode_semantic_tokens(
    tokens: &[GrishexSemanticToken],
    text: &str,
    location: &SourceLocation,
) -> Vec<SemanticToken> {
    let lines = Utf16Lines::new(text, location);
    let mut data = Vec::new();
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let token_type_index = SEMANTIC_TOKEN_KINDS
            .iter()
            .position(|kind| *kind == token.kind)
            .unwrap_or(0) as u32;
        for (line, start, length) in split_token_on_lines(token, text, &lines) {
            let delta_line = line.saturating_sub(prev_line);
            let delta_start = if delta_line == 0 {
                start.saturating_sub(prev_start)
            } else {
                start
            };
            data.push(SemanticToken {
                delta_line,
                delta_start,
                length,
                token_type: token_type_index,
                token_modifiers_bitset: 0,
            });
            prev_line = line;
            prev_start = start;
        }
    }

    data
}

/// Expand a token into `(line, utf16 column, utf16 length)` segments, one per line.
///
/// The wire format cannot span lines, so block comments and escaped line breaks in strings
/// are cut at every terminator. Terminators themselves are not part of any segment.
fn split_token_on_lines(
    token: &GrishexSemanticToken,
    text: &str,
    lines: &Utf16Lines<'_>,
) -> Vec<(u32, u32, u32)> {
    let slice = &text[token.range.span.clone()];
    let mut segments = Vec::new();
    let mut line = token.range.start.line as u32;
    let mut column = lines.column(token.range.start);
    let mut length = 0u32;
    let mut chars = slice.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if length > 0 {
                    segments.push((line, column, length));
                }
                line += 1;
                column = 0;
                length = 0;
            }
            _ => length += ch.len_utf16() as u32,
        }
    }
    if length > 0 {
        segments.push((line, column, length));
    }

    segments
}

fn to_lsp_folding_range(range: &GrishexFoldingRange) -> FoldingRange {
    FoldingRange {
        start_line: range.start_line,
        start_character: None,
        end_line: range.end_line,
        end_character: None,
        kind: range.kind.clone(),
        collapsed_text: None,
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for GrishexLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
            semantic_tokens_provider: Some(
                lsp_types::SemanticTokensServerCapabilities::SemanticTokensOptions(
                    SemanticTokensOptions {
                        work_done_progress_options: WorkDoneProgressOptions::default(),
                        legend: semantic_tokens_legend(),
                        range: None,
                        full: Some(SemanticTokensFullOptions::Bool(true)),
                    },
                ),
            ),
            ..ServerCapabilities::default()
        };
        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "grishex-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("grishex language server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: lsp_types::DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri,
            text,
            version,
            language_id,
        } = params.text_document;
        if language_id != LANGUAGE_ID {
            debug!(%uri, %language_id, "opened document with a foreign language id");
        }
        self.scan_and_publish(uri, text, Some(version)).await;
    }

    async fn did_change(&self, params: lsp_types::DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.scan_and_publish(
                params.text_document.uri,
                change.text,
                Some(params.text_document.version),
            )
            .await;
        }
    }

    async fn did_close(&self, params: lsp_types::DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri).await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        if let Some(entry) = self.document_entry(&params.text_document.uri).await {
            let DocumentEntry { scan, text } = entry;
            let tokens = self.features.semantic_tokens(&scan);
            let data = encode_semantic_tokens(&tokens, text.as_str(), scan.location());
            Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
                result_id: None,
                data,
            })))
        } else {
            Ok(None)
        }
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        if let Some(entry) = self.document_entry(&params.text_document.uri).await {
            let ranges = self.features.folding_ranges(&entry.scan);
            Ok(Some(ranges.iter().map(to_lsp_folding_range).collect()))
        } else {
            Ok(None)
        }
    }
}
