//! Left-panel explorer: connections, their schemas and the session tables.

use std::collections::HashMap;
use std::sync::Arc;

use dsw_gateway::{Backend, Connection, TableSchema};
use dsw_state::{LayoutStore, SessionTable, SessionTableRegistry};

use super::{ConnectionForm, NO_CONNECTIONS, NO_SESSION_TABLES, NO_TABLES};
use crate::error::Result;
use crate::events::{EventBus, WorkbenchEvent};

/// Expansion state of one connection in the schema tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNode {
    pub expanded: bool,
    /// Set once a schema request succeeded; never reset.
    pub loaded: bool,
    pub tables: Vec<TableSchema>,
}

/// Explorer panel controller.
pub struct ExplorerPanel {
    backend: Arc<dyn Backend>,
    bus: EventBus,
    layout: LayoutStore,
    session: SessionTableRegistry,
    connections: Vec<Connection>,
    nodes: HashMap<String, SchemaNode>,
}

impl ExplorerPanel {
    pub fn new(
        backend: Arc<dyn Backend>,
        bus: EventBus,
        layout: LayoutStore,
        session: SessionTableRegistry,
    ) -> Self {
        Self {
            backend,
            bus,
            layout,
            session,
            connections: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Load the connection list.
    pub async fn mount(&mut self) {
        self.refresh_connections().await;
    }

    /// Re-fetch the connection list. On failure the previous list stays.
    pub async fn refresh_connections(&mut self) -> bool {
        match self.backend.list_connections().await {
            Ok(connections) => {
                tracing::debug!(count = connections.len(), "connections refreshed");
                self.connections = connections;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to list connections");
                false
            }
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Text to show instead of an empty connection list.
    pub fn connections_placeholder(&self) -> Option<&'static str> {
        self.connections.is_empty().then_some(NO_CONNECTIONS)
    }

    /// A blank form for the "new connection" dialog.
    pub fn connection_form(&self) -> ConnectionForm {
        ConnectionForm::new()
    }

    /// Submit `form` and refresh the list when the backend accepts it.
    pub async fn submit_connection(&mut self, form: &mut ConnectionForm) -> Result<Connection> {
        let connection = form.submit(self.backend.as_ref()).await?;
        self.refresh_connections().await;
        Ok(connection)
    }

    /// Expand or collapse a connection.
    ///
    /// The schema is fetched on the first expand that finds it unloaded. A
    /// failed fetch leaves the node expanded but unloaded.
    pub async fn toggle_connection(&mut self, connection_id: &str) {
        let node = self.nodes.entry(connection_id.to_string()).or_default();
        node.expanded = !node.expanded;
        if !node.expanded || node.loaded {
            return;
        }

        match self.backend.schema(connection_id).await {
            Ok(schema) => {
                tracing::debug!(%connection_id, tables = schema.tables.len(), "schema loaded");
                let node = self.nodes.entry(connection_id.to_string()).or_default();
                node.tables = schema.tables;
                node.loaded = true;
            }
            Err(e) => {
                tracing::warn!(%connection_id, error = %e, "failed to load schema");
            }
        }
    }

    pub fn node(&self, connection_id: &str) -> Option<&SchemaNode> {
        self.nodes.get(connection_id)
    }

    pub fn is_expanded(&self, connection_id: &str) -> bool {
        self.node(connection_id).is_some_and(|n| n.expanded)
    }

    /// Tables of a loaded connection.
    pub fn tables(&self, connection_id: &str) -> Option<&[TableSchema]> {
        self.node(connection_id)
            .filter(|n| n.loaded)
            .map(|n| n.tables.as_slice())
    }

    /// Text to show under an expanded connection with no tables.
    pub fn schema_placeholder(&self, connection_id: &str) -> Option<&'static str> {
        self.node(connection_id)
            .filter(|n| n.expanded && n.loaded && n.tables.is_empty())
            .map(|_| NO_TABLES)
    }

    /// Open a schema table in the data grid.
    pub fn open_table(&self, table_name: &str) {
        self.bus.publish(WorkbenchEvent::DatasetOpened {
            name: table_name.to_string(),
        });
    }

    pub fn session_tables(&self) -> Vec<SessionTable> {
        self.session.tables()
    }

    pub fn session_placeholder(&self) -> Option<&'static str> {
        self.session.is_empty().then_some(NO_SESSION_TABLES)
    }

    /// Open a session table in the data grid.
    pub fn open_session_table(&self, table: &SessionTable) {
        self.open_table(&table.name);
    }

    pub fn resize(&self, delta: f64) {
        self.layout.resize_left(delta);
    }

    pub fn close(&self) {
        self.layout.set_left(false);
    }
}
