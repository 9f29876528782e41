//! Watched files handler.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use crate::config::{is_settings_file, reload_settings};
use crate::state::BackendState;

/// Handles the `workspace/didChangeWatchedFiles` notification.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) {
    debug!("Watched files changed: {:?}", params.changes);

    let settings_changed = params
        .changes
        .iter()
        .any(|change| is_settings_file(change.uri.path()));

    if settings_changed {
        info!("Settings file changed, reloading...");
        reload_settings(state);
    }
}
