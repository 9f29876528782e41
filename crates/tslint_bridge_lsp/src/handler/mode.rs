//! `tslint/modeChanged` notification.

use serde::Deserialize;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use tslint_bridge_core::{BufferEvent, BufferEventKind};

use crate::conversion::buffer_event;

/// Params of the mode-changed notification.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeChangedParams {
    pub uri: Url,
}

/// Handles the `tslint/modeChanged` notification, sent by clients when a
/// buffer switches into a linted language mode.
pub fn handle_mode_changed(params: ModeChangedParams) -> BufferEvent {
    debug!("Mode changed: {}", params.uri);
    buffer_event(BufferEventKind::ModeChanged, &params.uri)
}
