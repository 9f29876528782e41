//! File admission filter.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::BridgeError;

/// Decides which files are handed to the linter.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    extensions: Vec<String>,
    exclude_globs: Option<GlobSet>,
}

impl AdmissionFilter {
    /// Creates a filter from an extension allow-list and exclude patterns.
    ///
    /// Extensions may be given with or without the leading dot.
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self, BridgeError> {
        let extensions = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            extensions,
            exclude_globs: Self::build_globset(exclude)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, BridgeError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| BridgeError::settings(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| BridgeError::settings(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Returns true if `path` should be linted.
    pub fn admits(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        if !self.extensions.iter().any(|allowed| allowed == ext) {
            return false;
        }

        !self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
    }
}

impl Default for AdmissionFilter {
    /// Admits `.js` and `.jsx` files.
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string(), "jsx".to_string()],
            exclude_globs: None,
        }
    }
}
