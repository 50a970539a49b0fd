//! In-process stand-in for the analysis backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubState {
    fn record(&self, path: impl Into<String>, body: Value) {
        let Ok(mut guard) = self.requests.lock() else {
            return;
        };
        guard.push(RecordedRequest {
            path: path.into(),
            body,
        });
    }
}

/// Handle for the stub server; dropping it stops the server.
pub struct BackendStubHandle {
    base_url: String,
    join: JoinHandle<()>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl BackendStubHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .map(|r| r.body)
    }
}

impl Drop for BackendStubHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Spawns the stub on an ephemeral localhost port.
pub async fn spawn_backend_stub() -> BackendStubHandle {
    let state = StubState::default();
    let requests = Arc::clone(&state.requests);
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/connections", get(list_connections))
        .route("/api/connect", post(connect))
        .route("/api/schema/{id}", get(schema))
        .route("/api/preview", post(preview))
        .route("/api/query/run", post(run_sql))
        .route("/api/analyze/stats", post(stats))
        .route("/api/python/run", post(run_python))
        .route("/api/python/variables", get(variables))
        .route("/api/python/publish", post(publish))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    BackendStubHandle {
        base_url: format!("http://{addr}"),
        join,
        requests,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": "0.1.0" }))
}

async fn list_connections() -> Json<Value> {
    Json(json!([
        { "id": "demo", "name": "Demo DuckDB", "type": "duckdb", "status": "connected" },
        { "id": "pg1", "name": "Warehouse", "type": "postgres", "status": "connected" }
    ]))
}

async fn connect(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.record("/api/connect", body.clone());
    let name = body["name"].as_str().unwrap_or_default();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Connection name is required" })),
        )
            .into_response();
    }
    Json(json!({
        "id": format!("conn_{name}"),
        "name": name,
        "type": body["type"],
        "status": "connected"
    }))
    .into_response()
}

async fn schema(Path(id): Path<String>) -> Response {
    if id != "demo" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Schema not found or connection invalid" })),
        )
            .into_response();
    }
    Json(json!({
        "tables": [
            { "name": "loan_data_v2", "columns": [
                { "name": "id", "type": "INTEGER", "is_pk": true },
                { "name": "loan_amount", "type": "DOUBLE" }
            ]},
            { "name": "app_logs", "columns": [] }
        ]
    }))
    .into_response()
}

async fn preview(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("/api/preview", body.clone());
    Json(json!({
        "columns": [
            { "field": "id", "headerName": "ID", "type": "numeric" },
            { "field": "grade", "headerName": "Grade", "type": "text" }
        ],
        "data": [ { "id": 1, "grade": "A" }, { "id": 2, "grade": "B" } ],
        "total_rows": 2
    }))
}

async fn run_sql(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.record("/api/query/run", body.clone());
    if body["sql"].as_str().is_some_and(|sql| sql.contains("syntax error")) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Parser Error: syntax error at end of input" })),
        )
            .into_response();
    }
    Json(json!({
        "columns": [ { "field": "n", "headerName": "n", "type": "numeric" } ],
        "data": [ { "n": 42 } ]
    }))
    .into_response()
}

async fn stats(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.record("/api/analyze/stats", body.clone());
    if body["table_name"] == "garbage" {
        return (StatusCode::OK, "definitely not json").into_response();
    }
    Json(json!({
        "title": format!("Distribution of {}", body["column"].as_str().unwrap_or_default()),
        "chart_type": "bar",
        "data": {
            "xAxis": ["0k", "10k"],
            "series": [ { "data": [12, 30], "type": "bar" } ],
            "summary": { "count": 42, "missing": 0, "mean": 9000.0, "std": 100.5, "min": 500, "max": 19000 }
        }
    }))
    .into_response()
}

async fn run_python(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("/api/python/run", body.clone());
    let code = body["code"].as_str().unwrap_or_default();
    if code.contains("raise") {
        return Json(json!({
            "status": "error", "stdout": "", "error": "boom", "variables": []
        }));
    }
    Json(json!({
        "status": "success",
        "stdout": "hello\n",
        "error": null,
        "variables": [ { "name": "df", "type": "DataFrame", "rows": 3, "cols": 2 } ]
    }))
}

async fn variables(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let session = params.get("session_id").cloned().unwrap_or_default();
    state.record("/api/python/variables", json!({ "session_id": session }));
    Json(json!([ { "name": "df", "type": "DataFrame", "rows": 3, "cols": 2, "columns": ["a", "b"] } ]))
}

async fn publish(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.record("/api/python/publish", body.clone());
    let var_name = body["var_name"].as_str().unwrap_or_default();
    if var_name != "df" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": format!("Variable '{var_name}' not found in session") })),
        )
            .into_response();
    }
    let published = body["table_name"].as_str().unwrap_or(var_name);
    Json(json!({ "published_name": published, "rows": 3, "cols": 2 })).into_response()
}
