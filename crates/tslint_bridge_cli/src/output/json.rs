//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use super::Published;

pub fn output_json(published: &[Published]) -> Result<()> {
    let output: Vec<_> = published
        .iter()
        .map(|p| {
            serde_json::json!({
                "path": p.path.display().to_string(),
                "diagnostics": p.diagnostics,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
