//! tslint-bridge LSP Server
//!
//! Language Server Protocol front end for tslint-bridge.
//! Maps editor buffer events onto lint runs and publishes the diagnostics.

mod config;
mod conversion;
mod debounce;
mod dispatch;
mod handler;
mod sink;
mod state;

use std::sync::Arc;

use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, ClientSocket, LanguageServer, LspService, Server};
use tracing::info;

use tslint_bridge_core::BufferEventKind;

pub use handler::ModeChangedParams;
pub use sink::ClientSink;

use crate::conversion::buffer_event;
use crate::debounce::spawn_debounced_lint;
use crate::dispatch::{run_lint, spawn_lint};
use crate::state::{BackendState, SharedState};

/// Command that re-runs the last project-wide lint with `--fix`.
pub const FIX_COMMAND: &str = "tslint.fix";

/// Notification sent when a buffer switches language mode.
pub const MODE_CHANGED_METHOD: &str = "tslint/modeChanged";

/// The LSP backend for tslint-bridge.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// Starts with default settings; workspace settings are loaded during
    /// `initialize`.
    pub fn new(client: Client) -> Self {
        let sink = ClientSink::new(client.clone());
        Self {
            client,
            state: Arc::new(BackendState::new(sink)),
        }
    }

    /// Handles `tslint/modeChanged`.
    pub async fn mode_changed(&self, params: ModeChangedParams) {
        let event = handler::handle_mode_changed(params);
        spawn_lint(self.state.clone(), event);
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let event = handler::handle_did_open(&self.state, params);
        spawn_lint(self.state.clone(), event);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some((uri, version)) = handler::handle_did_change(&self.state, params) {
            let event = buffer_event(BufferEventKind::Changed, &uri);
            spawn_debounced_lint(self.state.clone(), uri, version, move |state| {
                run_lint(state, event)
            });
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let event = handler::handle_did_save(params);
        spawn_lint(self.state.clone(), event);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handler::handle_did_close(&self.state, params);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handler::handle_did_change_watched_files(&self.state, params).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        handler::handle_execute_command(&self.state, params)
    }
}

/// Builds the LSP service, including the custom notifications.
pub fn service() -> (LspService<Backend>, ClientSocket) {
    LspService::build(Backend::new)
        .custom_method(MODE_CHANGED_METHOD, Backend::mode_changed)
        .finish()
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("tslint-bridge LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
