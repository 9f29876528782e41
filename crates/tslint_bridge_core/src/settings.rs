//! Bridge settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::filter::AdmissionFilter;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/settings.json");
static SETTINGS_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Diagnostics source id reported to the editor.
pub const DEFAULT_SOURCE_ID: &str = "tslint-ts";

/// Default delay before a changed buffer is linted.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Settings for the bridge itself (not the linter's own config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// File extensions that are linted.
    pub extensions: Vec<String>,

    /// Glob patterns that are never linted.
    pub exclude: Vec<String>,

    /// Lint config file name searched for upwards.
    pub lint_config_file: String,

    /// Project config file name searched for upwards.
    pub project_config_file: String,

    /// Explicit linter executable.
    pub linter_command: Option<String>,

    /// Source id for published diagnostics.
    pub source_id: String,

    /// Honour `ruleSeverity` instead of reporting warnings only.
    pub use_rule_severity: bool,

    /// Debounce for changed buffers, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            extensions: vec![".js".to_string(), ".jsx".to_string()],
            exclude: Vec::new(),
            lint_config_file: "tslint.json".to_string(),
            project_config_file: "tsconfig.json".to_string(),
            linter_command: None,
            source_id: DEFAULT_SOURCE_ID.to_string(),
            use_rule_severity: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl BridgeSettings {
    /// Settings file names, in lookup order.
    pub const SETTINGS_FILES: &'static [&'static str] =
        &[".tslint-bridge.jsonc", ".tslint-bridge.json"];

    /// Finds a settings file directly inside `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        Self::SETTINGS_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads settings from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| BridgeError::settings(format!("Failed to read settings: {}", e)))?;

        Self::from_jsonc(&content)
    }

    /// Parses settings from a JSONC string with schema validation.
    pub fn from_jsonc(content: &str) -> Result<Self, BridgeError> {
        let value = jsonc_parser::parse_to_serde_value(content, &Default::default())
            .map_err(|e| BridgeError::settings(format!("Invalid JSONC: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Builds settings from an already-parsed JSON value, e.g. LSP initialization options.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BridgeError> {
        let schema = SETTINGS_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded settings schema");
            Validator::new(&schema_json).expect("Invalid settings schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(BridgeError::settings(format!(
                "Settings validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| BridgeError::settings(format!("Invalid settings: {}", e)))
    }

    /// Builds the admission filter described by these settings.
    pub fn admission_filter(&self) -> Result<AdmissionFilter, BridgeError> {
        AdmissionFilter::new(&self.extensions, &self.exclude)
    }
}
