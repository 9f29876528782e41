//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use miette::Result;
use tslint_bridge_core::Diagnostic;

use crate::cli::OutputFormat;

/// Diagnostics published for one file during a run.
#[derive(Debug, Clone)]
pub struct Published {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Prints the run's results. Returns true if any file has diagnostics.
pub fn output_results(published: &[Published], format: OutputFormat) -> Result<bool> {
    let has_diagnostics = published.iter().any(|p| !p.diagnostics.is_empty());

    match format {
        OutputFormat::Json => json::output_json(published)?,
        OutputFormat::Text => text::output_text(published),
    }

    Ok(has_diagnostics)
}
