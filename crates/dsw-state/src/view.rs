//! View store - active main view, selected dataset and analysis type.
//!
//! The three fields are independent: setting a dataset does not switch the
//! view, and no combination is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::observable::{Store, Subscription};

/// Dataset selected when the workbench starts.
pub const DEFAULT_DATASET_ID: &str = "loan_data_v2";

// =============================================================================
// ACTIVE VIEW
// =============================================================================

/// Main view shown in the centre workspace.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    /// Analysis dashboard.
    #[default]
    Dashboard,
    /// Data preview grid.
    Data,
    /// SQL / Python lab.
    Sql,
    /// Model center.
    Model,
    /// Statistics dashboard.
    Stats,
}

impl ActiveView {
    /// All views in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Data,
        Self::Sql,
        Self::Model,
        Self::Stats,
    ];

    /// Navigation label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Analysis",
            Self::Data => "Data Preview",
            Self::Sql => "SQL Lab",
            Self::Model => "Model Center",
            Self::Stats => "Stats",
        }
    }
}

// =============================================================================
// ANALYSIS TYPE
// =============================================================================

/// Statistical probe requested from the toolkit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Distribution,
    Missing,
    Outlier,
    Dupes,
}

impl AnalysisType {
    /// All analysis types in toolkit order.
    pub const ALL: [Self; 4] = [
        Self::Missing,
        Self::Outlier,
        Self::Dupes,
        Self::Distribution,
    ];

    /// Wire name sent to the backend.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::Missing => "missing",
            Self::Outlier => "outlier",
            Self::Dupes => "dupes",
        }
    }

    /// Short badge label.
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::Distribution => "DIST",
            Self::Missing => "MISSING",
            Self::Outlier => "OUTLIER",
            Self::Dupes => "DUPES",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// STATE + STORE
// =============================================================================

/// View slice of the UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_view: ActiveView,
    pub active_dataset_id: Option<String>,
    pub active_analysis_type: AnalysisType,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_view: ActiveView::Dashboard,
            active_dataset_id: Some(DEFAULT_DATASET_ID.to_string()),
            active_analysis_type: AnalysisType::Distribution,
        }
    }
}

/// Observable view store.
#[derive(Debug, Clone)]
pub struct ViewStore {
    store: Store<ViewState>,
}

impl ViewStore {
    /// Create a store with the default view, demo dataset and distribution analysis.
    pub fn create() -> Self {
        Self {
            store: Store::new(ViewState::default()),
        }
    }

    pub fn dispose(&self) {
        self.store.dispose();
    }

    pub fn state(&self) -> ViewState {
        self.store.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&ViewState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    pub fn active_view(&self) -> ActiveView {
        self.store.with(|s| s.active_view)
    }

    pub fn active_dataset_id(&self) -> Option<String> {
        self.store.with(|s| s.active_dataset_id.clone())
    }

    pub fn active_analysis_type(&self) -> AnalysisType {
        self.store.with(|s| s.active_analysis_type)
    }

    pub fn set_active_view(&self, view: ActiveView) {
        self.store.update(|s| s.active_view = view);
    }

    pub fn set_active_dataset_id(&self, id: Option<String>) {
        self.store.update(|s| s.active_dataset_id = id);
    }

    pub fn set_active_analysis_type(&self, analysis: AnalysisType) {
        self.store.update(|s| s.active_analysis_type = analysis);
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::create()
    }
}
