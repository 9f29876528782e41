//! Debouncing for change notifications.

use std::future::Future;
use std::time::Duration;

use tower_lsp::lsp_types::Url;
use tracing::{debug, error};

use crate::state::{BackendState, SharedState};

/// Spawns a debounced lint task.
///
/// Waits for the configured debounce period, then runs `lint` only if the
/// document version is still the one that scheduled it.
pub fn spawn_debounced_lint<F, Fut>(state: SharedState, uri: Url, version: i32, lint: F)
where
    F: FnOnce(SharedState) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let delay = Duration::from_millis(state.debounce_ms());

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        if check_version(&state, &uri, version) {
            lint(state).await;
        } else {
            debug!("Change to {} (version {}) superseded", uri, version);
        }
    });
}

/// Checks if the document version is still current.
fn check_version(state: &BackendState, uri: &Url, version: i32) -> bool {
    let docs = match state.documents.read() {
        Ok(g) => g,
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return false;
        }
    };

    docs.get(uri)
        .map(|doc| doc.version == version)
        .unwrap_or(false)
}
