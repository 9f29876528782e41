//! Publishes diagnostics to the LSP client.

use std::path::Path;

use tower_lsp::Client;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use tslint_bridge_core::{Diagnostic, DiagnosticSink};

use crate::conversion::to_lsp_diagnostic;

/// Forwards `set_errors` calls as `textDocument/publishDiagnostics`.
///
/// The color hint has no LSP counterpart and is dropped.
#[derive(Clone)]
pub struct ClientSink {
    client: Client,
}

impl ClientSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DiagnosticSink for ClientSink {
    async fn set_errors(
        &self,
        source_id: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        _color_hint: &str,
    ) {
        let Ok(uri) = Url::from_file_path(path) else {
            debug!("Cannot publish for non-absolute path {}", path.display());
            return;
        };

        let diagnostics = diagnostics
            .iter()
            .map(|d| to_lsp_diagnostic(d, source_id))
            .collect();

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}
