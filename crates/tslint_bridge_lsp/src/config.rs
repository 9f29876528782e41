//! Settings management for the LSP server.

use tracing::{error, info};

use tslint_bridge_core::BridgeSettings;

use crate::state::BackendState;

/// Applies settings sent as `initializationOptions`.
///
/// Returns false when there were none or they were rejected.
pub fn apply_initialization_options(
    state: &BackendState,
    options: Option<serde_json::Value>,
) -> bool {
    let Some(options) = options.filter(|value| !value.is_null()) else {
        return false;
    };

    match BridgeSettings::from_value(options) {
        Ok(settings) => {
            info!("Loaded settings from initialization options");
            apply_settings(state, settings)
        }
        Err(e) => {
            error!("Ignoring initialization options: {}", e);
            false
        }
    }
}

/// Reloads settings from the workspace root.
pub fn reload_settings(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let Some(root) = root else {
        return;
    };

    if let Some(settings_path) = BridgeSettings::discover(&root) {
        info!("Found settings file: {}", settings_path.display());
        match BridgeSettings::from_file(&settings_path) {
            Ok(settings) => {
                apply_settings(state, settings);
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
            }
        }
    }
}

/// Returns true if `path` names a bridge settings file.
pub fn is_settings_file(path: &str) -> bool {
    BridgeSettings::SETTINGS_FILES
        .iter()
        .any(|name| path.ends_with(name))
}

fn apply_settings(state: &BackendState, settings: BridgeSettings) -> bool {
    match state.session.update_settings(settings) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to apply settings: {}", e);
            false
        }
    }
}
