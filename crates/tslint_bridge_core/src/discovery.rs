//! Ancestor-directory discovery of configuration files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BridgeError;

/// Searches `start` and its ancestors for a file called `file_name`.
///
/// Returns the first match as `<dir>/<file_name>`, or `None` when the walk
/// reaches the filesystem root without finding one.
pub fn find_up(file_name: &str, start: &Path) -> Result<Option<PathBuf>, BridgeError> {
    for dir in start.ancestors() {
        let candidate = dir.join(file_name);
        let exists = candidate.try_exists().map_err(|source| BridgeError::Discovery {
            file_name: file_name.to_string(),
            source,
        })?;

        if exists && candidate.is_file() {
            debug!("Found {} at {}", file_name, candidate.display());
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Like [`find_up`], but a missing file is an error.
pub fn require_up(file_name: &str, start: &Path) -> Result<PathBuf, BridgeError> {
    find_up(file_name, start)?.ok_or_else(|| BridgeError::ConfigNotFound {
        file_name: file_name.to_string(),
        start: start.to_path_buf(),
    })
}

/// Directory a lint for `file` runs in.
pub fn working_dir_for(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
