//! Runs lint work off the request path.

use tracing::debug;

use tslint_bridge_core::BufferEvent;

use crate::state::SharedState;

/// Spawns the lint for `event` and returns immediately.
pub fn spawn_lint(state: SharedState, event: BufferEvent) {
    tokio::spawn(run_lint(state, event));
}

/// Lints for `event`. Failures are logged by the session.
pub async fn run_lint(state: SharedState, event: BufferEvent) {
    match state.session.handle(&event).await {
        Ok(outcome) => debug!("{:?} lint for {:?}: {:?}", event.kind, event.file_path, outcome),
        Err(e) => debug!("{:?} lint for {:?} aborted: {}", event.kind, event.file_path, e),
    }
}

/// Spawns a fix run of the last project-wide lint.
pub fn spawn_fix(state: SharedState) {
    tokio::spawn(async move {
        match state.session.fix_last_project().await {
            Ok(outcome) => debug!("Fix run: {:?}", outcome),
            Err(e) => debug!("Fix run aborted: {}", e),
        }
    });
}
