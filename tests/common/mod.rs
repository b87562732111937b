use std::collections::HashMap;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::sync::oneshot;

pub const MAIN_HASH: &str = "aaaa1111bbbb2222cccc3333dddd4444eeee5555";
pub const RELEASE_HASH: &str = "f00dfeed0000111122223333444455556666beef";

/// Ref that makes the fake API answer 500.
pub const BROKEN_REF: &str = "broken";
/// Ref that makes the fake API answer 200 with a body that is not JSON.
pub const GARBLED_REF: &str = "garbled";

#[derive(Clone, Default)]
struct FakeApi {
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    fn record(&self, uri: &Uri) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(uri.to_string());
        }
    }
}

/// In-process benchmark API bound to an ephemeral port.
pub struct ApiGuard {
    /// Base URL with trailing slash, e.g. `http://127.0.0.1:4000/api/`.
    pub api_url: String,
    seen: Arc<Mutex<Vec<String>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ApiGuard {
    /// Request paths with query strings, in arrival order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Drop for ApiGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn spawn_api() -> Result<ApiGuard> {
    let api = FakeApi::default();
    let seen = api.seen.clone();

    let app = Router::new()
        .route("/api/vitess/refs", get(refs))
        .route("/api/fk/compare", get(fk_compare))
        .route("/api/macrobench/compare", get(macrobench_compare))
        .with_state(api);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .context("bind fake api")?;
    let addr = listener.local_addr().context("fake api addr")?;

    let (tx, rx) = oneshot::channel::<()>();
    let handle = thread::spawn(move || {
        rt.block_on(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
        });
    });

    Ok(ApiGuard {
        api_url: format!("http://{}/api/", addr),
        seen,
        shutdown: Some(tx),
        handle: Some(handle),
    })
}

async fn refs(State(api): State<FakeApi>, uri: Uri) -> Response {
    api.record(&uri);
    axum::Json(json!({
        "branches": [{"name": "main", "commit_hash": MAIN_HASH}],
        "tags": [{"name": "v20.0.0", "commit_hash": RELEASE_HASH}],
    }))
    .into_response()
}

fn result_for(old: &str, new_qps: f64, q: &HashMap<String, String>) -> Response {
    match old {
        BROKEN_REF => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        GARBLED_REF => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => axum::Json(payload(
            q.get("oldWorkload").map(String::as_str).unwrap_or(""),
            q.get("newWorkload").map(String::as_str).unwrap_or(""),
            new_qps,
        ))
        .into_response(),
    }
}

fn payload(old_workload: &str, new_workload: &str, new_qps: f64) -> Value {
    json!({
        "old_workload": old_workload,
        "new_workload": new_workload,
        "metrics": {
            "qps": {"old": 1000.0, "new": new_qps},
            "latency.p99": {"old": 20.0, "new": 18.0},
            "errors": {"old": 0.0, "new": 2.0},
            "custom_metric": {"old": 5.0, "new": 5.0},
        }
    })
}

async fn fk_compare(
    State(api): State<FakeApi>,
    uri: Uri,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record(&uri);
    let sha = q.get("sha").cloned().unwrap_or_default();
    if sha.is_empty() {
        return (StatusCode::BAD_REQUEST, "missing sha").into_response();
    }
    result_for(&sha, 1100.0, &q)
}

async fn macrobench_compare(
    State(api): State<FakeApi>,
    uri: Uri,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record(&uri);
    let old = q.get("old").cloned().unwrap_or_default();
    let new = q.get("new").cloned().unwrap_or_default();
    if old.is_empty() || new.is_empty() {
        return (StatusCode::BAD_REQUEST, "missing refs").into_response();
    }
    result_for(&old, 1200.0, &q)
}

#[allow(dead_code)]
pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[allow(dead_code)]
pub fn run_benchdash(args: &[&str]) -> Result<CliOutput> {
    let out = Command::new(env!("CARGO_BIN_EXE_benchdash"))
        .args(args)
        .env_remove("BENCHDASH_LOG")
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("run benchdash {:?}", args))?;
    Ok(CliOutput {
        success: out.status.success(),
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
    })
}
