//! Parsing of the linter's `--format json` output.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::diagnostic::{Diagnostic, FileDiagnosticSet, Position, Range, Severity};
use crate::error::BridgeError;

/// One element of the linter's JSON failure array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintFailure {
    pub rule_name: String,
    pub failure: String,
    pub name: String,
    pub start_position: FailurePosition,
    pub end_position: FailurePosition,
    #[serde(default)]
    pub rule_severity: Option<String>,
}

/// Position as reported by the linter. The absolute `position` offset is ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FailurePosition {
    pub line: u32,
    pub character: u32,
}

impl From<FailurePosition> for Position {
    fn from(pos: FailurePosition) -> Self {
        Position::new(pos.line, pos.character)
    }
}

impl LintFailure {
    /// Converts the failure into a diagnostic.
    pub fn to_diagnostic(&self, use_rule_severity: bool) -> Diagnostic {
        let severity = match (&self.rule_severity, use_rule_severity) {
            (Some(s), true) => Severity::from_rule_severity(s),
            _ => Severity::Warning,
        };

        Diagnostic::new(
            format!("[{}] {}", self.rule_name, self.failure),
            Range::new(self.start_position.into(), self.end_position.into()),
        )
        .with_severity(severity)
        .with_rule_name(&self.rule_name)
    }
}

/// Options for [`parse_output`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions<'a> {
    /// Directory the linter ran in; relative file names are resolved against it.
    pub working_dir: Option<&'a Path>,
    /// Honour `ruleSeverity` instead of reporting everything as a warning.
    pub use_rule_severity: bool,
}

/// Parses linter stdout into diagnostics grouped by file.
pub fn parse_output(stdout: &str, options: ParseOptions<'_>) -> Result<FileDiagnosticSet, BridgeError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(FileDiagnosticSet::new());
    }

    let failures: Vec<LintFailure> = serde_json::from_str(trimmed)?;

    let mut set = FileDiagnosticSet::new();
    for failure in &failures {
        let path = resolve_name(&failure.name, options.working_dir);
        set.entry(path)
            .or_default()
            .push(failure.to_diagnostic(options.use_rule_severity));
    }

    Ok(set)
}

fn resolve_name(name: &str, working_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(name);
    match working_dir {
        Some(dir) if path.is_relative() => normalize(&dir.join(path)),
        _ => normalize(path),
    }
}

/// Lexically normalizes a path, folding `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
