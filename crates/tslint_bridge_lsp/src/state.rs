//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;

use tslint_bridge_core::{LintSession, ProcessRunner};

use crate::sink::ClientSink;

/// Lint session wired to the real linter and the LSP client.
pub(crate) type BridgeSession = LintSession<ProcessRunner, ClientSink>;

/// Open document version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub version: i32,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Versions of open documents, used to settle debounced changes.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Lint session; owns the published diagnostic state.
    pub session: BridgeSession,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("session", &"<LintSession>")
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a state with default settings, publishing through `sink`.
    pub fn new(sink: ClientSink) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            session: LintSession::with_default_settings(ProcessRunner::new(), sink),
            workspace_root: RwLock::new(None),
        }
    }

    /// Debounce delay for change events.
    pub fn debounce_ms(&self) -> u64 {
        self.session.settings().debounce_ms
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
