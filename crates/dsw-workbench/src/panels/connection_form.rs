//! "New connection" form.

use dsw_gateway::{
    Backend, Connection, ConnectionConfig, ConnectionRequest, ConnectionSecret, DatabaseEngine,
};

use crate::error::{Result, WorkbenchError};

/// Form fields and submission state for registering a connection.
///
/// Text fields are public; the engine goes through [`Self::select_engine`]
/// so host and port presets follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionForm {
    engine: DatabaseEngine,
    pub name: String,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    /// Database name, or file path for file engines.
    pub database: String,
    error: Option<String>,
    submitting: bool,
}

impl Default for ConnectionForm {
    fn default() -> Self {
        let mut form = Self {
            engine: DatabaseEngine::default(),
            name: String::new(),
            host: String::new(),
            port: String::new(),
            username: String::new(),
            password: String::new(),
            database: String::new(),
            error: None,
            submitting: false,
        };
        form.select_engine(DatabaseEngine::default());
        form
    }
}

impl ConnectionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> DatabaseEngine {
        self.engine
    }

    /// Switch engine and reset host and port to its presets.
    pub fn select_engine(&mut self, engine: DatabaseEngine) {
        self.engine = engine;
        self.port = engine.default_port().map(|p| p.to_string()).unwrap_or_default();
        self.host = if engine.is_file_based() {
            String::new()
        } else {
            "localhost".to_string()
        };
    }

    /// Inline error from the last submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Build the request body, or fail on the first invalid field.
    pub fn validate(&self) -> Result<ConnectionRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(WorkbenchError::validation("name", "Connection name is required"));
        }

        let database = non_empty(&self.database);
        let config = if self.engine.is_file_based() {
            if database.is_none() {
                return Err(WorkbenchError::validation("database", "Database file path is required"));
            }
            ConnectionConfig {
                database,
                ..ConnectionConfig::default()
            }
        } else {
            let Some(host) = non_empty(&self.host) else {
                return Err(WorkbenchError::validation("host", "Host is required"));
            };
            let port = match self.port.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    return Err(WorkbenchError::validation(
                        "port",
                        "Port must be a number between 1 and 65535",
                    ));
                }
            };
            ConnectionConfig {
                host: Some(host),
                port: Some(port),
                database,
                username: non_empty(&self.username),
            }
        };

        let secret = (!self.password.is_empty()).then(|| ConnectionSecret {
            password: self.password.clone(),
        });

        Ok(ConnectionRequest {
            engine: self.engine,
            name: name.to_string(),
            config,
            secret,
        })
    }

    /// Validate and send the form. Failures are also kept in [`Self::error`].
    pub async fn submit(&mut self, backend: &dyn Backend) -> Result<Connection> {
        self.error = None;
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        self.submitting = true;
        let result = backend.create_connection(&request).await;
        self.submitting = false;

        match result {
            Ok(connection) => {
                tracing::info!(connection_id = %connection.id, engine = %self.engine, "connection created");
                Ok(connection)
            }
            Err(e) => {
                tracing::warn!(error = %e, "connection failed");
                let message = e.user_message();
                self.error = Some(if message.is_empty() {
                    "Connection failed".to_string()
                } else {
                    message
                });
                Err(e.into())
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mysql_on_localhost() {
        let form = ConnectionForm::new();
        assert_eq!(form.engine(), DatabaseEngine::Mysql);
        assert_eq!(form.host, "localhost");
        assert_eq!(form.port, "3306");
    }

    #[test]
    fn test_select_engine_sets_presets() {
        let mut form = ConnectionForm::new();
        form.select_engine(DatabaseEngine::Postgres);
        assert_eq!(form.port, "5432");
        assert_eq!(form.host, "localhost");

        form.select_engine(DatabaseEngine::Duckdb);
        assert_eq!(form.port, "");
        assert_eq!(form.host, "");
    }

    #[test]
    fn test_name_is_required() {
        let form = ConnectionForm::new();
        let err = form.validate().unwrap_err();
        assert_eq!(err.user_message(), "Connection name is required");
    }

    #[test]
    fn test_file_engine_needs_path() {
        let mut form = ConnectionForm::new();
        form.select_engine(DatabaseEngine::Sqlite);
        form.name = "local".to_string();
        assert!(form.validate().is_err());

        form.database = "/data/app.db".to_string();
        let request = form.validate().unwrap();
        assert_eq!(request.config.database.as_deref(), Some("/data/app.db"));
        assert_eq!(request.config.host, None);
        assert_eq!(request.config.port, None);
    }

    #[test]
    fn test_port_must_be_numeric() {
        let mut form = ConnectionForm::new();
        form.name = "warehouse".to_string();
        form.port = "abc".to_string();
        assert!(matches!(
            form.validate(),
            Err(WorkbenchError::Validation { field: "port", .. })
        ));
    }

    #[test]
    fn test_server_request_shape() {
        let mut form = ConnectionForm::new();
        form.name = " warehouse ".to_string();
        form.username = "analyst".to_string();
        form.password = "hunter2".to_string();

        let request = form.validate().unwrap();
        assert_eq!(request.name, "warehouse");
        assert_eq!(request.config.host.as_deref(), Some("localhost"));
        assert_eq!(request.config.port, Some(3306));
        assert_eq!(request.config.username.as_deref(), Some("analyst"));
        assert_eq!(request.secret.unwrap().password, "hunter2");
    }
}
