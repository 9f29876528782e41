#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::sync::mpsc;
use tower_lsp::Server;
use tower_lsp::lsp_types::{PublishDiagnosticsParams, Url};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    // Simple LSP parser: read headers until \r\n\r\n, parse Content-Length, read body
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}

pub fn uri(path: &Path) -> Url {
    Url::from_file_path(path).unwrap()
}

/// Client side of an in-process server connected through duplex pipes.
pub struct TestClient {
    writer: DuplexStream,
    rx: mpsc::UnboundedReceiver<Value>,
    pending: VecDeque<Value>,
    next_id: i64,
}

impl TestClient {
    pub fn start() -> Self {
        let (client_read, server_write) = tokio::io::duplex(64 * 1024);
        let (server_read, client_write) = tokio::io::duplex(64 * 1024);

        let (service, socket) = tslint_bridge_lsp::service();
        tokio::spawn(async move {
            Server::new(server_read, server_write, socket)
                .serve(service)
                .await;
        });

        let mut reader = BufReader::new(client_read);
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(msg) = recv_msg(&mut reader).await {
                let value: Value = serde_json::from_str(&msg).unwrap();
                if tx.send(value).is_err() {
                    break;
                }
            }
        });

        Self {
            writer: client_write,
            rx,
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    pub async fn initialize(&mut self, root: &Path, options: Value) -> Value {
        let response = self
            .request(
                "initialize",
                json!({
                    "rootUri": uri(root),
                    "capabilities": {},
                    "initializationOptions": options,
                }),
            )
            .await;
        self.notify("initialized", json!({})).await;
        response
    }

    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        let msg = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;

        self.wait_for(|m| m["id"] == id && m.get("method").is_none())
            .await
            .unwrap_or_else(|| panic!("no response to {method}"))
    }

    pub async fn notify(&mut self, method: &str, params: Value) {
        let msg = json!({ "jsonrpc": "2.0", "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;
    }

    pub async fn did_open(&mut self, path: &Path) {
        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": {
                    "uri": uri(path),
                    "languageId": "javascript",
                    "version": 1,
                    "text": fs::read_to_string(path).unwrap_or_default(),
                }
            }),
        )
        .await;
    }

    pub async fn did_save(&mut self, path: &Path) {
        self.notify(
            "textDocument/didSave",
            json!({ "textDocument": { "uri": uri(path) } }),
        )
        .await;
    }

    pub async fn did_change(&mut self, path: &Path, version: i32) {
        self.notify(
            "textDocument/didChange",
            json!({
                "textDocument": { "uri": uri(path), "version": version },
                "contentChanges": [{ "text": format!("var x = {version}\n") }],
            }),
        )
        .await;
    }

    /// Waits for the next diagnostics published for `path`.
    pub async fn diagnostics_for(&mut self, path: &Path) -> Option<PublishDiagnosticsParams> {
        let target = uri(path);
        let msg = self
            .wait_for(|m| {
                m["method"] == "textDocument/publishDiagnostics"
                    && m["params"]["uri"] == target.as_str()
            })
            .await?;
        Some(serde_json::from_value(msg["params"].clone()).unwrap())
    }

    /// Returns the first message matching `pred`, keeping the others for later.
    async fn wait_for(&mut self, pred: impl Fn(&Value) -> bool) -> Option<Value> {
        if let Some(index) = self.pending.iter().position(&pred) {
            return self.pending.remove(index);
        }

        let rx = &mut self.rx;
        let pending = &mut self.pending;
        tokio::time::timeout(TIMEOUT, async {
            while let Some(msg) = rx.recv().await {
                if pred(&msg) {
                    return Some(msg);
                }
                pending.push_back(msg);
            }
            None
        })
        .await
        .ok()
        .flatten()
    }
}

/// A project with tslint.json, tsconfig.json and a scripted linter.
///
/// The linter appends its arguments to `runs.log` and prints `output.json`.
pub struct LintProject {
    dir: TempDir,
}

impl LintProject {
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("tslint.json"), r#"{ "rules": {} }"#).unwrap();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        fs::write(root.join("output.json"), "[]").unwrap();

        let script = root.join("fake-tslint");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{root}/runs.log'\ncat '{root}/output.json'\n",
                root = root.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn linter(&self) -> PathBuf {
        self.root().join("fake-tslint")
    }

    pub fn options(&self) -> Value {
        json!({ "linterCommand": self.linter() })
    }

    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.root().join("src").join(name);
        fs::write(&path, "var x = 1\n").unwrap();
        path
    }

    /// Sets the linter output to one failure per `(file, rule, message)`.
    pub fn set_output(&self, failures: &[(&Path, &str, &str)]) {
        let items: Vec<Value> = failures
            .iter()
            .map(|(file, rule, message)| {
                json!({
                    "ruleName": rule,
                    "failure": message,
                    "name": file,
                    "ruleSeverity": "ERROR",
                    "startPosition": { "line": 2, "character": 14, "position": 40 },
                    "endPosition": { "line": 2, "character": 15, "position": 41 }
                })
            })
            .collect();
        fs::write(
            self.root().join("output.json"),
            serde_json::to_string(&items).unwrap(),
        )
        .unwrap();
    }

    /// Argument lines of every linter run so far.
    pub fn runs(&self) -> Vec<String> {
        fs::read_to_string(self.root().join("runs.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
