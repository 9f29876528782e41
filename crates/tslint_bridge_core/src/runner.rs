//! Linter subprocess execution.

use std::future::Future;
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, error};

use crate::error::BridgeError;
use crate::invocation::Invocation;

/// Runs a linter invocation and returns its standard output.
pub trait LinterRunner: Send + Sync + 'static {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<String, BridgeError>> + Send;
}

/// Spawns a fresh linter process per run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl LinterRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, BridgeError> {
        let start = Instant::now();
        debug!(
            "Running {} {:?} in {}",
            invocation.program.display(),
            invocation.args_lossy(),
            invocation.working_dir.display()
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(BridgeError::Spawn)?;

        debug!(
            "Linter finished with {} in {}ms",
            output.status,
            start.elapsed().as_millis()
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Linter failed ({}): {}", output.status, stderr);
            return Err(BridgeError::Subprocess {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
