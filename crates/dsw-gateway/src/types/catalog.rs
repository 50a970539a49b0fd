//! Schema types (`/api/schema/{connection_id}`).

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub is_pk: bool,
}

/// A table and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,
}

/// Tables reachable through a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults() {
        let schema: DatabaseSchema = serde_json::from_str(
            r#"{"tables":[{"name":"loans","columns":[{"name":"id","type":"INTEGER","is_pk":true},{"name":"grade","type":"VARCHAR"}]},{"name":"empty"}]}"#,
        )
        .unwrap();

        let loans = &schema.tables[0];
        assert!(loans.columns[0].is_pk);
        assert!(loans.columns[0].nullable);
        assert!(!loans.columns[1].is_pk);
        assert!(schema.tables[1].columns.is_empty());
    }
}
