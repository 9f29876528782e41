//! LSP type conversion utilities.

use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url,
};

use tslint_bridge_core::{
    BufferEvent, BufferEventKind, Diagnostic as BridgeDiagnostic, Severity as BridgeSeverity,
};

/// Builds a buffer event for `uri`. Non-file URIs carry no path.
pub fn buffer_event(kind: BufferEventKind, uri: &Url) -> BufferEvent {
    BufferEvent {
        kind,
        file_path: uri.to_file_path().ok(),
    }
}

/// Converts a bridge diagnostic to an LSP diagnostic.
pub fn to_lsp_diagnostic(diag: &BridgeDiagnostic, source_id: &str) -> Diagnostic {
    let severity = match diag.severity {
        BridgeSeverity::Error => DiagnosticSeverity::ERROR,
        BridgeSeverity::Warning => DiagnosticSeverity::WARNING,
        BridgeSeverity::Information => DiagnosticSeverity::INFORMATION,
    };

    Diagnostic {
        range: to_lsp_range(&diag.range),
        severity: Some(severity),
        code: diag.rule_name.clone().map(NumberOrString::String),
        source: Some(source_id.to_string()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// Converts a zero-based bridge range to an LSP range.
pub fn to_lsp_range(range: &tslint_bridge_core::Range) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}
