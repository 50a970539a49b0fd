//! Backend gateway for the DataSnail workbench.
//!
//! The analysis backend (schema listing, previews, statistics, Python
//! kernel) is an external HTTP service. This crate owns the client side of
//! that contract:
//!
//! - [`types`]: request and response bodies, field-for-field with the backend
//! - [`Backend`]: the contract as an object-safe async trait
//! - [`BackendClient`]: the `reqwest` implementation
//! - [`GatewayError`]: transport, status and decode failures
//!
//! No call is retried. Callers decide whether a failure is shown to the user
//! or logged and dropped.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::Backend;
pub use client::BackendClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_SESSION_ID, GatewayConfig};
pub use error::{GatewayError, NETWORK_ERROR_MESSAGE, Result};
pub use types::{
    ChartPoint, ChartType, ColumnDef, ColumnKind, ColumnSchema, Connection,
    ConnectionConfig, ConnectionRequest, ConnectionSecret, DatabaseEngine, DatabaseSchema,
    HealthResponse, PreviewRequest, PreviewResponse, PublishRequest, PublishResponse,
    PythonRunRequest, PythonRunResponse, RunStatus, RuntimeVariable, Series, SqlRunRequest,
    StatsData, StatsRequest, StatsResponse, StatsSummary, TableSchema,
};
