//! Session table registry.
//!
//! Tables produced during the session (SQL runs, published Python
//! variables), newest first. Append and clear only; names are not
//! deduplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::observable::{Store, Subscription};

/// Whether a session entry is materialized or a view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Table,
    View,
}

/// A tabular result registered for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTable {
    pub id: String,
    pub name: String,
    pub row_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TableKind,
}

impl SessionTable {
    /// A materialized table whose id is its name, created now.
    pub fn named(name: impl Into<String>, row_count: u64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            row_count,
            created_at: Utc::now(),
            kind: TableKind::Table,
        }
    }
}

/// Session slice of the UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Newest first.
    pub tables: Vec<SessionTable>,
}

/// Observable session table registry.
#[derive(Debug, Clone)]
pub struct SessionTableRegistry {
    store: Store<SessionState>,
}

impl SessionTableRegistry {
    /// Create an empty registry.
    pub fn create() -> Self {
        Self::create_with(Vec::new())
    }

    /// Create a registry holding `tables`, newest first.
    pub fn create_with(tables: Vec<SessionTable>) -> Self {
        Self {
            store: Store::new(SessionState { tables }),
        }
    }

    pub fn dispose(&self) {
        self.store.dispose();
    }

    pub fn state(&self) -> SessionState {
        self.store.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Tables, newest first.
    pub fn tables(&self) -> Vec<SessionTable> {
        self.store.with(|s| s.tables.clone())
    }

    pub fn len(&self) -> usize {
        self.store.with(|s| s.tables.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a table in front of every existing one.
    pub fn add_table(&self, table: SessionTable) {
        tracing::debug!(table = %table.name, rows = table.row_count, "session table added");
        self.store.update(|s| s.tables.insert(0, table));
    }

    pub fn clear_tables(&self) {
        self.store.update(|s| s.tables.clear());
    }
}

impl Default for SessionTableRegistry {
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_are_kept() {
        let registry = SessionTableRegistry::create();
        registry.add_table(SessionTable::named("result", 1));
        registry.add_table(SessionTable::named("result", 2));

        let rows: Vec<u64> = registry.tables().iter().map(|t| t.row_count).collect();
        assert_eq!(rows, vec![2, 1]);
    }

    #[test]
    fn test_clear() {
        let registry = SessionTableRegistry::create();
        registry.add_table(SessionTable::named("a", 1));
        registry.clear_tables();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_serialized_kind_key() {
        let table = SessionTable::named("t", 3);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["type"], "table");
        assert_eq!(json["row_count"], 3);
    }
}
