//! Text output formatter

use tslint_bridge_core::{Diagnostic, Severity};

use super::Published;

pub fn output_text(published: &[Published]) {
    for file in published {
        if file.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", file.path.display());
        for diag in &file.diagnostics {
            println!("  {}", format_diagnostic(diag));
        }
    }

    let total_files = published
        .iter()
        .filter(|p| !p.diagnostics.is_empty())
        .count();
    let total_issues: usize = published.iter().map(|p| p.diagnostics.len()).sum();

    println!();
    println!(
        "Found {} issues in {} files",
        total_issues, total_files
    );
}

/// Formats one diagnostic with a one-based `line:column`.
fn format_diagnostic(diag: &Diagnostic) -> String {
    let severity = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Information => "info",
    };
    format!(
        "{}:{} {}: {}",
        diag.range.start.line + 1,
        diag.range.start.character + 1,
        severity,
        diag.message
    )
}
