//! `workspace/executeCommand` handler.

use serde_json::Value;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::ExecuteCommandParams;
use tracing::{debug, warn};

use crate::FIX_COMMAND;
use crate::dispatch::spawn_fix;
use crate::state::SharedState;

/// Handles `workspace/executeCommand`.
///
/// The fix run is spawned; the request returns before it finishes.
pub fn handle_execute_command(
    state: &SharedState,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    debug!("Execute command: {}", params.command);

    if params.command != FIX_COMMAND {
        warn!("Unknown command: {}", params.command);
        return Err(Error::invalid_params(format!(
            "Unknown command: {}",
            params.command
        )));
    }

    spawn_fix(state.clone());
    Ok(None)
}
