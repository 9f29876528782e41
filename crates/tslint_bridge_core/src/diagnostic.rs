//! Diagnostic types forwarded to the editor.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
///
/// Serialized as the numeric code the diagnostics surface understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Information - informational message.
    Information,
}

impl Severity {
    /// Maps a `ruleSeverity` string from linter output.
    pub fn from_rule_severity(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "off" | "none" | "info" | "information" => Severity::Information,
            _ => Severity::Warning,
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
        }
    }
}

/// Reads a severity code.
///
/// 1 is an error and 3 is information. 4 (hint) has no variant of its own
/// and is read as information. Any other code falls back to a warning.
impl From<u8> for Severity {
    fn from(value: u8) -> Self {
        match value {
            1 => Severity::Error,
            3 | 4 => Severity::Information,
            _ => Severity::Warning,
        }
    }
}

/// Zero-based line/character position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Source range of a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A single reported lint issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Message, prefixed with the rule name in brackets.
    pub message: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Source range.
    pub range: Range,

    /// Reserved type tag. Always `None` for linter results.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Rule that produced the diagnostic, when known.
    #[serde(skip)]
    pub rule_name: Option<String>,
}

impl Diagnostic {
    /// Creates a warning diagnostic.
    pub fn new(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            range,
            kind: None,
            rule_name: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the originating rule.
    pub fn with_rule_name(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = Some(rule_name.into());
        self
    }
}

/// Diagnostics grouped by absolute file path.
pub type FileDiagnosticSet = BTreeMap<PathBuf, Vec<Diagnostic>>;
