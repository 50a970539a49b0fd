//! Wire types of the backend contract.
//!
//! Field names match the backend's JSON exactly.

pub mod analysis;
pub mod catalog;
pub mod connection;
pub mod preview;
pub mod python;

use serde::{Deserialize, Serialize};

pub use analysis::{
    ChartPoint, ChartType, Series, StatsData, StatsRequest, StatsResponse,
    StatsSummary,
};
pub use catalog::{ColumnSchema, DatabaseSchema, TableSchema};
pub use connection::{
    Connection, ConnectionConfig, ConnectionRequest, ConnectionSecret, DatabaseEngine,
};
pub use preview::{ColumnDef, ColumnKind, PreviewRequest, PreviewResponse, SqlRunRequest};
pub use python::{
    PublishRequest, PublishResponse, PythonRunRequest, PythonRunResponse, RunStatus,
    RuntimeVariable,
};

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
