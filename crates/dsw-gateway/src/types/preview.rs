//! Tabular preview and SQL execution types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub table_name: String,
    pub limit: u32,
    /// SQL `WHERE` expression, e.g. `loan_amount > 10000 AND grade = 'A'`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl PreviewRequest {
    /// Preview `table_name` without a filter.
    pub fn new(table_name: impl Into<String>, limit: u32) -> Self {
        Self {
            table_name: table_name.into(),
            limit,
            filter: None,
        }
    }

    /// Attach a filter; blank input means no filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        let trimmed = filter.trim();
        self.filter = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

/// Body of `POST /api/query/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlRunRequest {
    pub session_id: String,
    pub sql: String,
    pub limit: u32,
}

/// Value family of a column, used for cell formatting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Datetime,
    #[default]
    #[serde(other)]
    Text,
}

/// Grid column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub field: String,
    #[serde(rename = "headerName")]
    pub header_name: String,
    #[serde(rename = "type", default)]
    pub kind: ColumnKind,
}

/// Rows and column definitions for a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// One object per row, keyed by column field.
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
}

impl PreviewResponse {
    /// Total row count reported by the backend, or the rows returned.
    pub fn row_count(&self) -> u64 {
        self.total_rows.unwrap_or(self.data.len() as u64)
    }

    /// Cell value as display text; missing and null cells are empty.
    pub fn cell_text(&self, row: usize, field: &str) -> String {
        match self.data.get(row).and_then(|r| r.get(field)) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
