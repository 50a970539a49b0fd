//! The backend contract as a trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Connection, ConnectionRequest, DatabaseSchema, HealthResponse, PreviewRequest,
    PreviewResponse, PublishRequest, PublishResponse, PythonRunRequest, PythonRunResponse,
    RuntimeVariable, SqlRunRequest, StatsRequest, StatsResponse,
};

/// Operations the workbench needs from the analysis backend.
///
/// Every call is a single request/response: no retries, no caching. A second
/// call for the same resource may overtake the first.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse>;

    /// `GET /api/connections`
    async fn list_connections(&self) -> Result<Vec<Connection>>;

    /// `POST /api/connect`
    async fn create_connection(&self, request: &ConnectionRequest) -> Result<Connection>;

    /// `GET /api/schema/{connection_id}`
    async fn schema(&self, connection_id: &str) -> Result<DatabaseSchema>;

    /// `POST /api/preview`
    async fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse>;

    /// `POST /api/query/run`
    async fn run_sql(&self, request: &SqlRunRequest) -> Result<PreviewResponse>;

    /// `POST /api/analyze/stats`
    async fn analyze_stats(&self, request: &StatsRequest) -> Result<StatsResponse>;

    /// `POST /api/python/run`
    async fn run_python(&self, request: &PythonRunRequest) -> Result<PythonRunResponse>;

    /// `GET /api/python/variables?session_id=...`
    async fn python_variables(&self, session_id: &str) -> Result<Vec<RuntimeVariable>>;

    /// `POST /api/python/publish`
    async fn publish_variable(&self, request: &PublishRequest) -> Result<PublishResponse>;
}
