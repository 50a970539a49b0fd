//! Python kernel types (`/api/python/*`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/python/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonRunRequest {
    pub session_id: String,
    pub code: String,
}

/// Outcome reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// A DataFrame bound in the Python session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub rows: u64,
    pub cols: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// First rows in pandas `split` orientation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Value>,
}

impl RuntimeVariable {
    /// `"<rows>x<cols> <type>"`, as listed in the variable explorer.
    pub fn shape_label(&self) -> String {
        format!("{}x{} {}", self.rows, self.cols, self.type_name)
    }
}

/// Response of `POST /api/python/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PythonRunResponse {
    pub status: RunStatus,
    #[serde(default)]
    pub stdout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub variables: Vec<RuntimeVariable>,
}

impl PythonRunResponse {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Body of `POST /api/python/publish`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub session_id: String,
    pub var_name: String,
    /// Target table name; the backend uses `var_name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// Response of `POST /api/python/publish`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub published_name: String,
    pub rows: u64,
    pub cols: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_run_decoding() {
        let response: PythonRunResponse = serde_json::from_str(
            r#"{"status":"error","stdout":"","error":"name 'pd' is not defined","variables":[]}"#,
        )
        .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.error.as_deref(), Some("name 'pd' is not defined"));
    }

    #[test]
    fn test_variable_decoding() {
        let variable: RuntimeVariable = serde_json::from_str(
            r#"{"name":"df","type":"DataFrame","rows":5,"cols":2,"columns":["a","b"],
                "preview":{"index":[0],"columns":["a","b"],"data":[[1,2]]}}"#,
        )
        .unwrap();
        assert_eq!(variable.shape_label(), "5x2 DataFrame");
        assert_eq!(variable.columns.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_publish_without_rename_omits_table_name() {
        let request = PublishRequest {
            session_id: "default".to_string(),
            var_name: "df".to_string(),
            table_name: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"session_id":"default","var_name":"df"}"#);
    }
}
