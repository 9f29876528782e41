//! Bridge error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while discovering configuration or running the linter.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No lint configuration was found in the ancestor chain.
    #[error("No {file_name} found above {}", .start.display())]
    ConfigNotFound { file_name: String, start: PathBuf },

    /// Probing a directory during the ancestor walk failed.
    #[error("Failed to search for {file_name}: {source}")]
    Discovery {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The linter process could not be started.
    #[error("Failed to spawn linter: {0}")]
    Spawn(#[source] std::io::Error),

    /// The linter process exited unsuccessfully.
    #[error("Linter exited with {}: {stderr}", describe_exit(.code))]
    Subprocess { code: Option<i32>, stderr: String },

    /// The linter printed something other than a JSON failure array.
    #[error("Malformed linter output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// Invalid bridge settings.
    #[error("Settings error: {0}")]
    Settings(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "signal".to_string(),
    }
}

impl BridgeError {
    /// Creates a settings error.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    /// Returns true if this error only means "nothing to lint with".
    pub fn is_config_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}
