#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;
use tokio::sync::oneshot;
use tslint_bridge_core::{
    BridgeError, BridgeSettings, Diagnostic, DiagnosticSink, Invocation, LintSession, LinterRunner,
};

/// One scripted linter response.
pub struct Scripted {
    output: Result<String, (Option<i32>, String)>,
    gate: Option<oneshot::Receiver<()>>,
}

impl Scripted {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            output: Ok(stdout.into()),
            gate: None,
        }
    }

    pub fn failure(code: i32, stderr: &str) -> Self {
        Self {
            output: Err((Some(code), stderr.to_string())),
            gate: None,
        }
    }

    /// Holds the response back until the returned sender fires.
    pub fn gated(mut self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.gate = Some(rx);
        (self, tx)
    }
}

/// Linter runner that replays scripted responses and records invocations.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Scripted>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new(responses: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn args(&self, index: usize) -> Vec<String> {
        self.invocations()[index].args_lossy()
    }
}

impl LinterRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, BridgeError> {
        self.invocations.lock().unwrap().push(invocation.clone());
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected linter run");

        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }

        scripted
            .output
            .map_err(|(code, stderr)| BridgeError::Subprocess { code, stderr })
    }
}

/// Sink that records every publish.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(PathBuf, Vec<Diagnostic>)>>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<(PathBuf, Vec<Diagnostic>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn summary(&self) -> Vec<(PathBuf, usize)> {
        self.calls()
            .into_iter()
            .map(|(path, diags)| (path, diags.len()))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    async fn set_errors(
        &self,
        _source_id: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        _color_hint: &str,
    ) {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), diagnostics.to_vec()));
    }
}

pub type TestSession = LintSession<ScriptedRunner, RecordingSink>;

pub fn session(responses: impl IntoIterator<Item = Scripted>) -> TestSession {
    let settings = BridgeSettings {
        linter_command: Some("tslint".to_string()),
        ..Default::default()
    };
    LintSession::new(settings, ScriptedRunner::new(responses), RecordingSink::default()).unwrap()
}

/// A project directory with optional lint and project configs.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(with_lint_config: bool, with_project_config: bool) -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        if with_lint_config {
            fs::write(dir.path().join("tslint.json"), r#"{ "rules": {} }"#).unwrap();
        }
        if with_project_config {
            fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join("src").join(name);
        fs::write(&path, "var x = 1\n").unwrap();
        path
    }
}

/// Builds linter JSON output with one failure per `(file, rule)` pair.
pub fn lint_output<P: AsRef<Path>>(failures: &[(P, &str)]) -> String {
    let items: Vec<serde_json::Value> = failures
        .iter()
        .map(|(file, rule)| {
            serde_json::json!({
                "ruleName": rule,
                "failure": format!("{rule} failed"),
                "name": file.as_ref().to_string_lossy(),
                "ruleSeverity": "ERROR",
                "startPosition": { "line": 0, "character": 0, "position": 0 },
                "endPosition": { "line": 0, "character": 3, "position": 3 }
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}
