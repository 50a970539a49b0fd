//! The workbench root: stores, event bus, coordinator and panel factories.

use std::fmt;
use std::sync::Arc;

use dsw_gateway::{Backend, BackendClient};
use dsw_state::{
    ActiveView, LayoutStore, ScriptRegistry, SessionTableRegistry, TabRegistry, ViewStore,
    DEFAULT_DATASET_ID,
};

use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::events::{EventBus, WorkbenchEvent};
use crate::panels::{
    ConnectionForm, DataGridPanel, ExplorerPanel, ScriptLab, StatsPanel, ToolkitPanel,
    VariableExplorer,
};
use crate::settings::Settings;
use crate::stores::Stores;

/// Text of the model center placeholder view.
pub const MODEL_CENTER_PLACEHOLDER: &str = "Model Center View (Placeholder)";

/// What the centre area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainContent {
    Dashboard { dataset_id: String },
    DataGrid { dataset_id: String },
    Stats { dataset_id: String },
    ScriptLab,
    ModelCenter,
}

impl MainContent {
    /// Heading shown above the centre area.
    pub fn title(&self) -> String {
        match self {
            Self::Dashboard { dataset_id } => format!("Analysis Dashboard: {dataset_id}"),
            Self::DataGrid { dataset_id } | Self::Stats { dataset_id } => dataset_id.clone(),
            Self::ScriptLab => ActiveView::Sql.label().to_string(),
            Self::ModelCenter => MODEL_CENTER_PLACEHOLDER.to_string(),
        }
    }
}

/// One open workbench.
pub struct Workbench {
    settings: Settings,
    backend: Arc<dyn Backend>,
    stores: Stores,
    bus: EventBus,
    coordinator: Option<Coordinator>,
}

impl Workbench {
    /// Build a workbench over an existing backend.
    pub fn new(settings: Settings, backend: Arc<dyn Backend>) -> Self {
        let stores = Stores::from_settings(&settings);
        let bus = EventBus::new();
        let coordinator = Coordinator::attach(&bus, &stores);
        tracing::debug!(backend = %settings.backend.base_url, "workbench created");
        Self {
            settings,
            backend,
            stores,
            bus,
            coordinator: Some(coordinator),
        }
    }

    /// Build a workbench talking HTTP to `settings.backend`.
    pub fn connect(settings: Settings) -> Result<Self> {
        let client = BackendClient::new(&settings.backend)?;
        Ok(Self::new(settings, Arc::new(client)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn layout(&self) -> &LayoutStore {
        &self.stores.layout
    }

    pub fn view(&self) -> &ViewStore {
        &self.stores.view
    }

    pub fn scripts(&self) -> &ScriptRegistry {
        &self.stores.scripts
    }

    pub fn session(&self) -> &SessionTableRegistry {
        &self.stores.session
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.stores.tabs
    }

    // ------------------------------------------------------------------
    // Panels
    // ------------------------------------------------------------------

    pub fn explorer(&self) -> ExplorerPanel {
        ExplorerPanel::new(
            self.backend(),
            self.bus.clone(),
            self.stores.layout.clone(),
            self.stores.session.clone(),
        )
    }

    pub fn connection_form(&self) -> ConnectionForm {
        ConnectionForm::new()
    }

    pub fn data_grid(&self) -> DataGridPanel {
        DataGridPanel::new(
            self.backend(),
            self.stores.view.clone(),
            self.settings.grid.preview_limit,
        )
    }

    pub fn stats(&self) -> StatsPanel {
        StatsPanel::new(
            self.backend(),
            self.stores.view.clone(),
            self.settings.stats.default_column.as_str(),
        )
    }

    pub fn script_lab(&self) -> ScriptLab {
        ScriptLab::new(
            self.backend(),
            self.bus.clone(),
            self.stores.scripts.clone(),
            self.settings.scripts.clone(),
            self.settings.backend.session_id.as_str(),
        )
    }

    /// Variable explorer, not yet polling. Call `mount()` inside a runtime.
    pub fn variable_explorer(&self) -> VariableExplorer {
        VariableExplorer::new(
            self.backend(),
            self.bus.clone(),
            self.stores.session.clone(),
            self.settings.backend.session_id.as_str(),
            self.settings.polling.variables_interval(),
        )
    }

    pub fn toolkit(&self) -> ToolkitPanel {
        ToolkitPanel::new(
            self.bus.clone(),
            self.stores.layout.clone(),
            self.stores.view.clone(),
        )
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Resolve the centre view from the view store.
    pub fn main_content(&self) -> MainContent {
        let state = self.stores.view.state();
        let dataset_id = state
            .active_dataset_id
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string());
        match state.active_view {
            ActiveView::Dashboard => MainContent::Dashboard { dataset_id },
            ActiveView::Data => MainContent::DataGrid { dataset_id },
            ActiveView::Stats => MainContent::Stats { dataset_id },
            ActiveView::Sql => MainContent::ScriptLab,
            ActiveView::Model => MainContent::ModelCenter,
        }
    }

    /// Open `name` in the data grid.
    pub fn open_dataset(&self, name: impl Into<String>) {
        self.bus.publish(WorkbenchEvent::DatasetOpened { name: name.into() });
    }

    /// Detach the coordinator and dispose the bus and every store.
    pub fn dispose(&mut self) {
        self.coordinator = None;
        self.bus.dispose();
        self.stores.dispose();
        tracing::debug!("workbench disposed");
    }
}

impl fmt::Debug for Workbench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbench")
            .field("settings", &self.settings)
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}
