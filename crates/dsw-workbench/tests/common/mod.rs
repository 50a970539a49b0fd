//! In-memory backend for workbench tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dsw_gateway::{
    Backend, Connection, ConnectionRequest, DatabaseSchema, GatewayError, HealthResponse,
    PreviewRequest, PreviewResponse, PublishRequest, PublishResponse, PythonRunRequest,
    PythonRunResponse, Result, RuntimeVariable, SqlRunRequest, StatsRequest, StatsResponse,
    TableSchema,
};
use dsw_workbench::{Settings, Workbench};
use serde_json::{Value, json};

/// Scriptable [`Backend`] that records every call.
#[derive(Default)]
pub struct FakeBackend {
    offline: AtomicBool,
    connections: Mutex<Vec<Connection>>,
    schemas: Mutex<HashMap<String, DatabaseSchema>>,
    variables: Mutex<Vec<RuntimeVariable>>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        backend.add_connection("demo", "Demo DuckDB", "duckdb");
        backend.set_schema(
            "demo",
            DatabaseSchema {
                tables: vec![table("loan_data_v2"), table("app_logs")],
            },
        );
        Arc::new(backend)
    }

    /// Every call fails with a transport error while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn add_connection(&self, id: &str, name: &str, engine: &str) {
        self.connections.lock().unwrap().push(Connection {
            id: id.to_string(),
            name: name.to_string(),
            engine: engine.to_string(),
            status: Some("connected".to_string()),
        });
    }

    pub fn set_schema(&self, connection_id: &str, schema: DatabaseSchema) {
        self.schemas
            .lock()
            .unwrap()
            .insert(connection_id.to_string(), schema);
    }

    pub fn set_variables(&self, variables: Vec<RuntimeVariable>) {
        *self.variables.lock().unwrap() = variables;
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(name, _)| *name == op).count()
    }

    pub fn last(&self, op: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| *name == op)
            .map(|(_, body)| body.clone())
    }

    fn record(&self, op: &'static str, body: Value) -> Result<()> {
        self.calls.lock().unwrap().push((op, body));
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

pub fn table(name: &str) -> TableSchema {
    TableSchema {
        name: name.to_string(),
        columns: Vec::new(),
    }
}

pub fn variable(name: &str, rows: u64) -> RuntimeVariable {
    RuntimeVariable {
        name: name.to_string(),
        type_name: "DataFrame".to_string(),
        rows,
        cols: 3,
        columns: None,
        preview: None,
    }
}

fn rejected(status: u16, detail: impl Into<String>) -> GatewayError {
    GatewayError::Status {
        status,
        detail: detail.into(),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture json")
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health(&self) -> Result<HealthResponse> {
        self.record("health", Value::Null)?;
        Ok(HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        })
    }

    async fn list_connections(&self) -> Result<Vec<Connection>> {
        self.record("list_connections", Value::Null)?;
        Ok(self.connections.lock().unwrap().clone())
    }

    async fn create_connection(&self, request: &ConnectionRequest) -> Result<Connection> {
        self.record("create_connection", json!(request))?;
        if request.name == "duplicate" {
            return Err(rejected(400, "Connection 'duplicate' already exists"));
        }
        let id = format!("conn_{}", self.connections.lock().unwrap().len());
        self.add_connection(&id, &request.name, request.engine.as_str());
        Ok(Connection {
            id,
            name: request.name.clone(),
            engine: request.engine.to_string(),
            status: Some("connected".to_string()),
        })
    }

    async fn schema(&self, connection_id: &str) -> Result<DatabaseSchema> {
        self.record("schema", json!(connection_id))?;
        self.schemas
            .lock()
            .unwrap()
            .get(connection_id)
            .cloned()
            .ok_or_else(|| rejected(404, "Schema not found or connection invalid"))
    }

    async fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse> {
        self.record("preview", json!(request))?;
        if request.table_name == "missing_table" {
            return Err(rejected(400, "Table missing_table does not exist"));
        }
        Ok(decode(json!({
            "columns": [
                {"field": "id", "headerName": "id", "type": "numeric"},
                {"field": "source", "headerName": "source", "type": "text"}
            ],
            "data": [
                {"id": 1, "source": request.table_name},
                {"id": 2, "source": request.table_name}
            ],
            "total_rows": 2
        })))
    }

    async fn run_sql(&self, request: &SqlRunRequest) -> Result<PreviewResponse> {
        self.record("run_sql", json!(request))?;
        if request.sql.contains("syntax error") {
            return Err(rejected(400, "Parser Error: syntax error at or near \"error\""));
        }
        Ok(decode(json!({
            "columns": [{"field": "id", "headerName": "id", "type": "numeric"}],
            "data": [{"id": 1}, {"id": 2}],
            "total_rows": 42
        })))
    }

    async fn analyze_stats(&self, request: &StatsRequest) -> Result<StatsResponse> {
        self.record("analyze_stats", json!(request))?;
        Ok(decode(json!({
            "title": format!("{} of {}", request.kind, request.column),
            "chart_type": if request.kind.as_str() == "missing" { "heatmap" } else { "bar" },
            "data": {
                "xAxis": ["A", "B", "C"],
                "series": [{"data": [10, 20, 30], "type": "bar"}],
                "summary": {"count": 60, "missing": 0, "mean": 20.0, "std": 8.2, "min": 10, "max": 30}
            }
        })))
    }

    async fn run_python(&self, request: &PythonRunRequest) -> Result<PythonRunResponse> {
        self.record("run_python", json!(request))?;
        if request.code.contains("1/0") {
            return Ok(decode(json!({
                "status": "error",
                "stdout": "",
                "error": "ZeroDivisionError: division by zero",
                "variables": []
            })));
        }
        let stdout = if request.code.contains("print") { "hello\n" } else { "" };
        Ok(decode(json!({
            "status": "success",
            "stdout": stdout,
            "variables": [{"name": "df", "type": "DataFrame", "rows": 128, "cols": 6}]
        })))
    }

    async fn python_variables(&self, session_id: &str) -> Result<Vec<RuntimeVariable>> {
        self.record("python_variables", json!(session_id))?;
        Ok(self.variables.lock().unwrap().clone())
    }

    async fn publish_variable(&self, request: &PublishRequest) -> Result<PublishResponse> {
        self.record("publish_variable", json!(request))?;
        if request.var_name != "df" {
            return Err(rejected(
                400,
                format!("Variable '{}' not found in session", request.var_name),
            ));
        }
        Ok(PublishResponse {
            published_name: request.table_name.clone().unwrap_or_else(|| request.var_name.clone()),
            rows: 128,
            cols: 6,
        })
    }
}

/// A workbench over a fresh [`FakeBackend`], with demo content.
pub fn workbench() -> (Workbench, Arc<FakeBackend>) {
    workbench_with(Settings::default())
}

pub fn workbench_with(settings: Settings) -> (Workbench, Arc<FakeBackend>) {
    let backend = FakeBackend::new();
    let workbench = Workbench::new(settings, backend.clone());
    (workbench, backend)
}
