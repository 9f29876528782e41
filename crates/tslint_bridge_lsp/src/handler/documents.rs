//! Document lifecycle handlers (open, change, save, close).

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use tslint_bridge_core::{BufferEvent, BufferEventKind};

use crate::conversion::buffer_event;
use crate::state::{BackendState, DocumentData};

/// Handles the `textDocument/didOpen` notification.
///
/// Returns the buffer-entered event to lint for.
pub fn handle_did_open(state: &BackendState, params: DidOpenTextDocumentParams) -> BufferEvent {
    debug!("Document opened: {}", params.text_document.uri);

    track_version(
        state,
        params.text_document.uri.clone(),
        params.text_document.version,
    );

    buffer_event(BufferEventKind::Entered, &params.text_document.uri)
}

/// Handles the `textDocument/didChange` notification.
///
/// Returns the URI and version for debounced linting.
pub fn handle_did_change(
    state: &BackendState,
    params: DidChangeTextDocumentParams,
) -> Option<(Url, i32)> {
    debug!("Document changed: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    let version = params.text_document.version;

    if !track_version(state, uri.clone(), version) {
        return None;
    }

    Some((uri, version))
}

/// Handles the `textDocument/didSave` notification.
pub fn handle_did_save(params: DidSaveTextDocumentParams) -> BufferEvent {
    debug!("Document saved: {}", params.text_document.uri);
    buffer_event(BufferEventKind::Saved, &params.text_document.uri)
}

/// Handles the `textDocument/didClose` notification.
///
/// Published diagnostics stay until the next lint touches the file.
pub fn handle_did_close(state: &BackendState, params: DidCloseTextDocumentParams) {
    debug!("Document closed: {}", params.text_document.uri);

    match state.documents.write() {
        Ok(mut docs) => {
            docs.remove(&params.text_document.uri);
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }
}

fn track_version(state: &BackendState, uri: Url, version: i32) -> bool {
    let mut docs = match state.documents.write() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return false;
        }
    };
    docs.insert(uri, DocumentData { version });
    true
}
