//! Tab registry - secondary tabs (grid, sql, chart, report).
//!
//! Closing the active tab always activates the tab that is last in the
//! remaining list, never the closed tab's neighbour.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observable::{Store, Subscription};

/// Content shown by a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TabKind {
    Grid,
    Sql,
    Chart,
    Report,
}

/// An open tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TabKind,
    pub title: String,
    /// Opaque payload, e.g. `{"datasetId": "loan_data_v2"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A tab before the registry assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTab {
    pub kind: TabKind,
    pub title: String,
    pub data: Option<serde_json::Value>,
}

impl NewTab {
    pub fn new(kind: TabKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Tab slice of the UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabsState {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<String>,
}

/// Observable tab registry.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    store: Store<TabsState>,
}

impl TabRegistry {
    /// Create an empty registry.
    pub fn create() -> Self {
        Self::create_with(Vec::new())
    }

    /// Create a registry holding `tabs`; the first one becomes active.
    pub fn create_with(tabs: Vec<Tab>) -> Self {
        let active_tab_id = tabs.first().map(|t| t.id.clone());
        Self {
            store: Store::new(TabsState {
                tabs,
                active_tab_id,
            }),
        }
    }

    pub fn dispose(&self) {
        self.store.dispose();
    }

    pub fn state(&self) -> TabsState {
        self.store.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&TabsState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.store.with(|s| s.tabs.clone())
    }

    pub fn active_tab_id(&self) -> Option<String> {
        self.store.with(|s| s.active_tab_id.clone())
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.store.with(|s| {
            let id = s.active_tab_id.as_deref()?;
            s.tabs.iter().find(|t| t.id == id).cloned()
        })
    }

    /// Append a tab with a fresh id and activate it. Returns the id.
    pub fn add_tab(&self, tab: NewTab) -> String {
        let id = Uuid::new_v4().to_string();
        self.store.update(|s| {
            s.tabs.push(Tab {
                id: id.clone(),
                kind: tab.kind,
                title: tab.title,
                data: tab.data,
            });
            s.active_tab_id = Some(id.clone());
        });
        id
    }

    /// Remove a tab; if it was active, activate the last remaining tab.
    pub fn close_tab(&self, id: &str) {
        self.store.update(|s| {
            s.tabs.retain(|t| t.id != id);
            if s.active_tab_id.as_deref() == Some(id) {
                s.active_tab_id = s.tabs.last().map(|t| t.id.clone());
            }
        });
    }

    /// Focus a tab. The id is not checked against the list.
    pub fn set_active_tab(&self, id: impl Into<String>) {
        let id = id.into();
        self.store.update(|s| s.active_tab_id = Some(id));
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::create()
    }
}
