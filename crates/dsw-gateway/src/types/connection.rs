//! Connection types (`/api/connections`, `/api/connect`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Database engines the connection form offers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Mysql,
    Postgres,
    Clickhouse,
    Hive,
    Duckdb,
    Sqlite,
    Oracle,
    Mssql,
}

impl DatabaseEngine {
    /// All engines in form order.
    pub const ALL: [Self; 8] = [
        Self::Mysql,
        Self::Postgres,
        Self::Clickhouse,
        Self::Hive,
        Self::Duckdb,
        Self::Sqlite,
        Self::Oracle,
        Self::Mssql,
    ];

    /// Wire identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
            Self::Clickhouse => "clickhouse",
            Self::Hive => "hive",
            Self::Duckdb => "duckdb",
            Self::Sqlite => "sqlite",
            Self::Oracle => "oracle",
            Self::Mssql => "mssql",
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mysql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Clickhouse => "ClickHouse",
            Self::Hive => "Hive",
            Self::Duckdb => "DuckDB",
            Self::Sqlite => "SQLite",
            Self::Oracle => "Oracle",
            Self::Mssql => "SQL Server",
        }
    }

    /// Port preset, `None` for file-based engines.
    pub const fn default_port(&self) -> Option<u16> {
        match self {
            Self::Mysql => Some(3306),
            Self::Postgres => Some(5432),
            Self::Clickhouse => Some(8123),
            Self::Hive => Some(10000),
            Self::Oracle => Some(1521),
            Self::Mssql => Some(1433),
            Self::Duckdb | Self::Sqlite => None,
        }
    }

    /// Engines addressed by a file path instead of host and port.
    pub const fn is_file_based(&self) -> bool {
        matches!(self, Self::Duckdb | Self::Sqlite)
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == lower)
            .ok_or_else(|| format!("unknown database engine: {s}"))
    }
}

/// A configured connection as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub name: String,
    /// Engine identifier; kept as text so unknown engines still list.
    #[serde(rename = "type")]
    pub engine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Connection {
    /// The engine, if it is one the client knows.
    pub fn engine(&self) -> Option<DatabaseEngine> {
        self.engine.parse().ok()
    }
}

/// Non-secret connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Database name for server engines, file path for file engines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Credentials sent alongside the config.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSecret {
    pub password: String,
}

impl fmt::Debug for ConnectionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSecret")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    #[serde(rename = "type")]
    pub engine: DatabaseEngine,
    pub name: String,
    pub config: ConnectionConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<ConnectionSecret>,
}
