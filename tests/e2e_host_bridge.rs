//! End-to-end tests for the `tabscout-host` binary (stdin/stdout JSON bridge).
//!
//! Each test spawns the binary with a config file in a temporary directory,
//! sends JSON commands over stdin and reads JSON responses from stdout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde_json::{Value, json};
use tabscout::AppConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

// ---------------------------------------------------------------------------
// Test harness
// ---------------------------------------------------------------------------

struct HostBridgeHarness {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    reader: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

impl HostBridgeHarness {
    async fn spawn(dir: &Path) -> Self {
        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            let mut config = AppConfig::default();
            config.storage.path = dir.join("store.json");
            config.search.candidate_timeout_ms = 500;
            config.save_to_file(&config_path).expect("write config");
        }

        let mut child = Command::new(env!("CARGO_BIN_EXE_tabscout-host"))
            .arg(&config_path)
            .env("TABSCOUT_DATA_DIR", dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn tabscout-host");

        let child_stdin = child.stdin.take().expect("no stdin on child process");
        let child_stdout = child.stdout.take().expect("no stdout on child process");

        Self {
            child,
            stdin: BufWriter::new(child_stdin),
            reader: BufReader::new(child_stdout).lines(),
            next_id: 0,
        }
    }

    /// Send a command and return its response.
    async fn send(&mut self, command: &str, payload: Value) -> Value {
        self.next_id += 1;
        let request_id = self.next_id.to_string();
        let envelope = json!({
            "v": 1,
            "request_id": request_id,
            "command": command,
            "payload": payload,
        });
        let mut line = serde_json::to_string(&envelope).expect("serialize");
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).await.expect("write");
        self.stdin.flush().await.expect("flush");

        let response = self.read_line().await;
        assert_eq!(response["request_id"], request_id, "{response}");
        response
    }

    /// Read the next JSON line from stdout (with timeout).
    async fn read_line(&mut self) -> Value {
        let line = tokio::time::timeout(Duration::from_secs(10), self.reader.next_line())
            .await
            .expect("timeout reading from tabscout-host")
            .expect("IO error reading from tabscout-host")
            .expect("unexpected EOF from tabscout-host");
        serde_json::from_str(&line)
            .unwrap_or_else(|e| panic!("invalid JSON from tabscout-host: {e}\nraw line: {line}"))
    }

    /// Close stdin and wait for a clean exit.
    async fn shutdown(mut self) {
        self.stdin.shutdown().await.expect("close stdin");
        drop(self.stdin);
        let status = tokio::time::timeout(Duration::from_secs(10), self.child.wait())
            .await
            .expect("timeout waiting for exit")
            .expect("wait");
        assert!(status.success(), "tabscout-host exited with {status}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_ranks_open_tabs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut host = HostBridgeHarness::spawn(dir.path()).await;

    let html = "<html><head><title>Async book</title></head>\
                <body><p>Futures are lazy and do nothing unless polled.</p></body></html>";
    let resp = host
        .send(
            "tab.open",
            json!({"tab_id": 1, "url": "https://rust-lang.github.io/async-book/", "window_id": 1, "html": html}),
        )
        .await;
    assert_eq!(resp["ok"], true, "{resp}");
    host.send(
        "tab.open",
        json!({"tab_id": 2, "url": "https://polled.example/", "title": "Home", "window_id": 2, "text": "welcome"}),
    )
    .await;

    let resp = host
        .send("search", json!({"query": "polled", "current_window": 1}))
        .await;
    assert_eq!(resp["ok"], true);
    let payload = &resp["payload"];
    assert_eq!(payload["kind"], "ranked");
    assert_eq!(payload["webSearch"], "polled");
    let tabs = payload["tabs"].as_array().expect("tabs");
    assert_eq!(tabs.len(), 2);
    // A hostname match outranks a word-prefix content match.
    assert_eq!(tabs[0]["id"], 2);
    assert_eq!(tabs[0]["isCurrentWindow"], false);
    assert_eq!(tabs[1]["id"], 1);
    assert_eq!(tabs[1]["hasSnippets"], true);
    assert_eq!(tabs[1]["isCurrentWindow"], true);

    host.shutdown().await;
}

#[tokio::test]
async fn history_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut host = HostBridgeHarness::spawn(dir.path()).await;
    host.send(
        "tab.open",
        json!({"tab_id": 4, "url": "https://docs.rs/serde", "text": "derive macros"}),
    )
    .await;
    let resp = host
        .send("select", json!({"tab_id": 4, "query": "derive"}))
        .await;
    assert_eq!(resp["ok"], true, "{resp}");
    host.shutdown().await;

    let mut host = HostBridgeHarness::spawn(dir.path()).await;
    let resp = host.send("history", Value::Null).await;
    assert_eq!(resp["payload"]["history"], json!(["derive"]));

    let resp = host.send("search", json!({"query": "der"})).await;
    assert_eq!(resp["payload"]["history"], json!(["derive"]));
    host.shutdown().await;
}

#[tokio::test]
async fn invalid_command_gets_error_response() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut host = HostBridgeHarness::spawn(dir.path()).await;
    let resp = host.send("tab.close", json!({"tab": "one"})).await;
    assert_eq!(resp["ok"], false);
    assert!(
        resp["error"]
            .as_str()
            .is_some_and(|e| e.contains("invalid tab.close payload"))
    );
    host.shutdown().await;
}
